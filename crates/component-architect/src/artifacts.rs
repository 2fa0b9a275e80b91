//! On-disk artifact writing: component fragments and the React preview
//! export.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use guardrail::SourceBundle;

/// Write the bundle's non-empty fragments as
/// `<slug>.component.{ts,html,scss}`. Returns the written paths in
/// ts/html/scss order.
pub fn write_component(bundle: &SourceBundle, output_dir: &Path, slug: &str) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output dir {}", output_dir.display()))?;

    let mut written = Vec::new();
    for (ext, content) in [
        ("ts", bundle.ts.as_str()),
        ("html", bundle.html.as_str()),
        ("scss", bundle.scss.as_str()),
    ] {
        let content = content.trim();
        if content.is_empty() {
            continue;
        }
        let path = output_dir.join(format!("{slug}.component.{ext}"));
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

/// Export the component as a standalone React preview file `<slug>.tsx`.
///
/// The TypeScript class is preserved as a comment block; the SCSS ships as
/// an inline style payload and the HTML is injected with backticks escaped
/// so the template literal survives.
pub fn export_tsx(bundle: &SourceBundle, output_dir: &Path, slug: &str) -> Result<PathBuf> {
    let escaped_html = bundle.html.replace('`', "\\`");

    let tsx = format!(
        "// AUTO-EXPORTED by Guided Component Architect
import React from \"react\";

// Original TypeScript Logic
/*
{ts}
*/

// Styles (original SCSS)
const styles = `
{scss}
`;

export default function ComponentPreview() {{
  return (
    <>
      <style dangerouslySetInnerHTML={{{{ __html: styles }}}} />
      <div
        className=\"preview-wrapper\"
        dangerouslySetInnerHTML={{{{
          __html: `{html}`,
        }}}}
      />
    </>
  );
}}
",
        ts = bundle.ts,
        scss = bundle.scss,
        html = escaped_html,
    );

    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output dir {}", output_dir.display()))?;
    let path = output_dir.join(format!("{slug}.tsx"));
    fs::write(&path, tsx).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> SourceBundle {
        SourceBundle::from_fragments(
            "export class CardComponent {}",
            "<div>`quoted`</div>",
            ".card { padding: 8px; }",
        )
    }

    #[test]
    fn test_write_component_skips_empty_fragments() {
        let dir = tempfile::tempdir().unwrap();
        let mut bundle = bundle();
        bundle.scss.clear();

        let written = write_component(&bundle, dir.path(), "login-card").unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["login-card.component.ts", "login-card.component.html"]);
        assert!(!dir.path().join("login-card.component.scss").exists());
    }

    #[test]
    fn test_write_component_contents_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        write_component(&bundle(), dir.path(), "card").unwrap();
        let ts = fs::read_to_string(dir.path().join("card.component.ts")).unwrap();
        assert_eq!(ts, "export class CardComponent {}");
    }

    #[test]
    fn test_export_tsx_escapes_backticks() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_tsx(&bundle(), dir.path(), "card").unwrap();
        assert_eq!(path.file_name().unwrap(), "card.tsx");

        let tsx = fs::read_to_string(&path).unwrap();
        assert!(tsx.contains("import React from \"react\";"));
        assert!(tsx.contains("<div>\\`quoted\\`</div>"));
        assert!(tsx.contains(".card { padding: 8px; }"));
        assert!(tsx.contains("export default function ComponentPreview()"));
    }
}
