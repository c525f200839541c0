use rand::Rng;

pub const ID_PREFIX: &str = "mermaid-";

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 11;

/// Container id of one rendered diagram (`mermaid-<base36 token>`).
///
/// Tokens come from a non-cryptographic RNG and are not checked against ids already emitted
/// into the same document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagramId(String);

impl DiagramId {
    pub fn from_token(token: &str) -> Self {
        Self(format!("{ID_PREFIX}{token}"))
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let token: String = (0..TOKEN_LEN)
            .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
            .collect();
        Self::from_token(&token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the SVG element the rendering library produces for this diagram.
    pub fn svg_id(&self) -> String {
        format!("{}-svg", self.0)
    }
}

impl std::fmt::Display for DiagramId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait IdSource: Send + Sync {
    fn next_id(&self) -> DiagramId;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdSource;

impl IdSource for RandomIdSource {
    fn next_id(&self) -> DiagramId {
        DiagramId::random(&mut rand::thread_rng())
    }
}
