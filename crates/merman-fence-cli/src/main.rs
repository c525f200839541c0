use merman_fence::{FenceOptions, MarkdownRenderer, MermaidPlugin, escape_html};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Fence(merman_fence::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Fence(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<merman_fence::Error> for CliError {
    fn from(value: merman_fence::Error) -> Self {
        Self::Fence(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Render,
    Assets,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<PathBuf>,
    theme: Option<String>,
    js_url: Option<String>,
    css_url: Option<String>,
    viewer_js_url: Option<String>,
    theme_variables: Vec<(String, String)>,
    html_only: bool,
    standalone: bool,
    out: Option<String>,
    verbose: bool,
}

fn usage() -> &'static str {
    "merman-fence-cli\n\
\n\
USAGE:\n\
  merman-fence-cli [render] [--theme <name>] [--js-url <url>] [--css-url <url>] [--viewer-js-url <url>] [--theme-var <key>=<value>]... [--html-only] [--config <options.json>] [--standalone] [--out <path>] [--verbose] [<path>|-]\n\
  merman-fence-cli assets [--verbose] <dir>\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', markdown is read from stdin.\n\
  - render prints HTML to stdout by default; use --out to write a file.\n\
  - Flags override values loaded with --config.\n\
  - --standalone wraps the fragment in a complete HTML document.\n\
  - assets writes viewer.js and style.css for use with --viewer-js-url and --css-url.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<String, CliError> {
    it.next().cloned().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" if args.input.is_none() => args.command = Command::Render,
            "assets" if args.input.is_none() => args.command = Command::Assets,
            "--theme" => args.theme = Some(next_value(&mut it)?),
            "--js-url" => args.js_url = Some(next_value(&mut it)?),
            "--css-url" => args.css_url = Some(next_value(&mut it)?),
            "--viewer-js-url" => args.viewer_js_url = Some(next_value(&mut it)?),
            "--theme-var" => {
                let pair = next_value(&mut it)?;
                let Some((key, value)) = pair.split_once('=') else {
                    return Err(CliError::Usage(usage()));
                };
                if key.trim().is_empty() {
                    return Err(CliError::Usage(usage()));
                }
                args.theme_variables
                    .push((key.trim().to_string(), value.to_string()));
            }
            "--config" => args.config = Some(PathBuf::from(next_value(&mut it)?)),
            "--html-only" => args.html_only = true,
            "--standalone" => args.standalone = true,
            "--out" => args.out = Some(next_value(&mut it)?),
            "--verbose" | "-v" => args.verbose = true,
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.command == Command::Assets && args.input.as_deref().is_none_or(|dir| dir == "-") {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn build_options(args: &Args) -> Result<FenceOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => FenceOptions::from_json_file(path)?,
        None => FenceOptions::default(),
    };
    if let Some(theme) = &args.theme {
        options = options.with_theme(theme.as_str());
    }
    if let Some(url) = &args.js_url {
        options = options.with_js_url(url.as_str());
    }
    if let Some(url) = &args.css_url {
        options = options.with_css_url(url.as_str());
    }
    if let Some(url) = &args.viewer_js_url {
        options = options.with_viewer_js_url(url.as_str());
    }
    for (key, value) in &args.theme_variables {
        options = options.with_theme_variable(key.as_str(), value.as_str());
    }
    if args.html_only {
        options = options.with_html_only(true);
    }
    Ok(options.normalized())
}

fn document_title(input: Option<&str>) -> String {
    input
        .filter(|p| *p != "-")
        .and_then(|p| Path::new(p).file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Document".to_string())
}

fn standalone_document(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape_html(title)
    )
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Assets => {
            let dir = args.input.as_deref().ok_or(CliError::Usage(usage()))?;
            for path in merman_fence::assets::write_assets(Path::new(dir))? {
                tracing::debug!(path = %path.display(), "wrote asset");
                println!("{}", path.display());
            }
            Ok(())
        }
        Command::Render => {
            let options = build_options(&args)?;
            tracing::debug!(?options, "fence options");
            let markdown = read_input(args.input.as_deref())?;

            let mut md = MarkdownRenderer::new();
            md.use_plugin(MermaidPlugin::new(options));
            let mut html = md.render(&markdown);
            if args.standalone {
                html = standalone_document(&document_title(args.input.as_deref()), &html);
            }
            write_text(&html, args.out.as_deref())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
