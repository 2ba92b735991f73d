use serde::Serialize;

use crate::cli::OutputFormat;

pub mod table;

/// Render a response in the requested format.
///
/// `text` produces the human-readable form; JSON forms serialize `value`.
pub fn render<T, F>(value: &T, format: OutputFormat, text: F) -> anyhow::Result<String>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a response in the requested format.
pub fn output<T, F>(value: &T, format: OutputFormat, text: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let rendered = render(value, format, text)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        doi: &'static str,
        verdict: &'static str,
    }

    const EXAMPLE: Example = Example {
        doi: "10.1/x",
        verdict: "valid",
    };

    fn text(e: &Example) -> String {
        format!("{}: {}", e.doi, e.verdict)
    }

    #[test]
    fn text_render_uses_formatter() {
        let out = render(&EXAMPLE, OutputFormat::Text, text).expect("text render should work");
        assert_eq!(out, "10.1/x: valid");
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&EXAMPLE, OutputFormat::Json, text).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["doi"], "10.1/x");
        assert_eq!(parsed["verdict"], "valid");
        assert!(out.contains('\n'));
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&EXAMPLE, OutputFormat::Raw, text).expect("raw render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["verdict"], "valid");
        assert!(!out.contains('\n'));
    }
}
