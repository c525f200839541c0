
use crate::{DiagramId, IdSource};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Deterministic ids: `mermaid-t0`, `mermaid-t1`, ...
#[derive(Default)]
pub(crate) struct SequentialIds(AtomicUsize);

impl IdSource for SequentialIds {
    fn next_id(&self) -> DiagramId {
        let n = self.0.fetch_add(1, Ordering::Relaxed);
        DiagramId::from_token(&format!("t{n}"))
    }
}
