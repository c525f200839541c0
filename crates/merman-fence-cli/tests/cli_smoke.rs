use assert_cmd::Command;
use std::fs;

const DOC: &str = "# Flow\n\n```mermaid\ngraph TD; A-->B\n```\n\n```rust\nfn main() {}\n```\n";

fn cli() -> Command {
    Command::new(assert_cmd::cargo_bin!("merman-fence-cli"))
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf-8 stdout")
}

#[test]
fn renders_markdown_from_stdin() {
    let output = cli()
        .arg("render")
        .write_stdin(DOC)
        .assert()
        .success()
        .get_output()
        .clone();
    let html = stdout_of(&output);

    assert!(html.contains("<h1>Flow</h1>"));
    assert_eq!(html.matches("class=\"mermaid-container\"").count(), 1);
    assert!(html.contains("graph TD; A--&gt;B"));
    assert!(html.contains("<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"));
    assert!(html.contains("if (!window.initMermaidDiagram) {"));
}

#[test]
fn render_writes_out_file_with_flags() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("notes.md");
    let out = tmp.path().join("notes.html");
    fs::write(&input, DOC).expect("write input");

    cli()
        .args([
            "render",
            "--theme",
            "dark",
            "--css-url",
            "/static/mermaid.css",
            "--viewer-js-url",
            "/static/viewer.js",
            "--standalone",
            "--out",
            out.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let html = fs::read_to_string(&out).expect("read output");
    assert!(html.starts_with("<!doctype html>"));
    assert!(html.contains("<title>notes</title>"));
    assert!(html.contains("<link rel=\"stylesheet\" href=\"/static/mermaid.css\">"));
    assert!(html.contains("<script src=\"/static/viewer.js\"></script>"));
    assert!(html.contains(", \"dark\");</script>"));
    assert!(!html.contains("<style>"));
}

#[test]
fn config_file_is_overridden_by_flags() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("options.json");
    fs::write(
        &config,
        r##"{"theme": "forest", "js_url": "https://cdn.example.test/mermaid.js", "theme_variables": {"primaryColor": "#fff"}}"##,
    )
    .expect("write config");

    let output = cli()
        .args([
            "render",
            "--config",
            config.to_string_lossy().as_ref(),
            "--theme",
            "neutral",
            "--theme-var",
            "lineColor=#333",
        ])
        .write_stdin(DOC)
        .assert()
        .success()
        .get_output()
        .clone();
    let html = stdout_of(&output);

    assert!(html.contains(
        r##""https://cdn.example.test/mermaid.js", "neutral", {"primaryColor":"#fff","lineColor":"#333"});"##
    ));
}

#[test]
fn html_only_has_no_scripts() {
    let output = cli()
        .args(["render", "--html-only", "-"])
        .write_stdin(DOC)
        .assert()
        .success()
        .get_output()
        .clone();
    let html = stdout_of(&output);

    assert!(html.contains("class=\"mermaid-code\""));
    assert!(!html.contains("<script"));
    assert!(!html.contains("<style"));
}

#[test]
fn assets_command_writes_both_files() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dir = tmp.path().join("public");

    cli()
        .args(["assets", dir.to_string_lossy().as_ref()])
        .assert()
        .success();

    let viewer = fs::read_to_string(dir.join("viewer.js")).expect("viewer.js");
    assert!(viewer.contains("window.initMermaidDiagram = function"));
    let css = fs::read_to_string(dir.join("style.css")).expect("style.css");
    assert!(css.contains(".mermaid-container"));
}

#[test]
fn usage_errors_exit_with_code_two() {
    cli().arg("--bogus").assert().code(2);
    cli().args(["render", "--theme-var", "novalue"]).assert().code(2);
    cli().arg("assets").assert().code(2);
}

#[test]
fn malformed_config_exits_with_code_one() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("broken.json");
    fs::write(&config, "{ not json").expect("write config");

    cli()
        .args(["render", "--config", config.to_string_lossy().as_ref()])
        .write_stdin(DOC)
        .assert()
        .code(1);
}
