//! SVG document loading
//!
//! Extracts the raw `d` attributes of path elements inside a named group.
//! The `d` attribute is the sole datum consumed: transforms, styles, and
//! every other SVG feature are not interpreted.

use roxmltree::Document;
use tracing::debug;

use super::error::SvgError;

/// Group id used by the reference city patch exports.
pub const DEFAULT_GROUP_ID: &str = "PatchCollection_1";

/// Extracts path data strings from the group with the given id.
///
/// # Errors
///
/// Returns [`SvgError::Document`] for malformed XML and
/// [`SvgError::GroupNotFound`] if no element carries the group id. Paths
/// without a `d` attribute are skipped.
pub fn extract_paths(svg_text: &str, group_id: &str) -> Result<Vec<String>, SvgError> {
    let doc = Document::parse(svg_text).map_err(|e| SvgError::Document(e.to_string()))?;

    let group = doc
        .descendants()
        .find(|node| node.attribute("id") == Some(group_id))
        .ok_or_else(|| SvgError::GroupNotFound(group_id.to_string()))?;

    let paths: Vec<String> = group
        .descendants()
        .filter(|node| node.has_tag_name("path"))
        .filter_map(|node| node.attribute("d").map(str::to_string))
        .collect();

    debug!(group = group_id, paths = paths.len(), "extracted SVG paths");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        <svg xmlns="http://www.w3.org/2000/svg">
          <g id="PatchCollection_1">
            <path d="M0,0 L10,0 L10,10 Z"/>
            <path d="M5,5 L15,5 L15,15 Z"/>
            <path fill="red"/>
          </g>
          <g id="other">
            <path d="M99,99 L100,100 Z"/>
          </g>
        </svg>"#;

    #[test]
    fn test_extracts_only_group_paths() {
        let paths = extract_paths(DOC, DEFAULT_GROUP_ID).unwrap();
        assert_eq!(
            paths,
            vec!["M0,0 L10,0 L10,10 Z", "M5,5 L15,5 L15,15 Z"]
        );
    }

    #[test]
    fn test_missing_group() {
        let result = extract_paths(DOC, "nope");
        assert_eq!(result, Err(SvgError::GroupNotFound("nope".to_string())));
    }

    #[test]
    fn test_malformed_document() {
        let result = extract_paths("<svg><g id=", DEFAULT_GROUP_ID);
        assert!(matches!(result, Err(SvgError::Document(_))));
    }
}
