//! Assertions over generated scripts.

use crate::synth::GUIDANCE_NOTICE;

/// Asserts that the script contains `needle`.
pub fn assert_script_contains(script: &str, needle: &str) {
    assert!(
        script.contains(needle),
        "Expected script to contain {needle:?}, got:\n{script}"
    );
}

/// Asserts that the script does not contain `needle`.
pub fn assert_script_lacks(script: &str, needle: &str) {
    assert!(
        !script.contains(needle),
        "Expected script not to contain {needle:?}, got:\n{script}"
    );
}

/// Asserts that the script is a guidance stub: comments only, with the notice.
pub fn assert_guidance_only(script: &str) {
    assert_script_contains(script, GUIDANCE_NOTICE);
    for line in script.lines().filter(|l| !l.trim().is_empty()) {
        assert!(
            line.starts_with('#'),
            "Expected only comments in a guidance script, found {line:?}"
        );
    }
}

/// Asserts basic shape: non-empty, four-space indentation, no tabs or
/// trailing whitespace, and every block opener followed by a deeper line.
pub fn assert_well_formed(script: &str) {
    assert!(!script.trim().is_empty(), "Expected a non-empty script");
    assert!(script.ends_with('\n'), "Expected a trailing newline");

    let lines: Vec<&str> = script.lines().collect();
    for (index, line) in lines.iter().enumerate() {
        assert!(!line.contains('\t'), "Tab on line {}: {line:?}", index + 1);
        assert_eq!(
            line.trim_end(),
            *line,
            "Trailing whitespace on line {}",
            index + 1
        );
        let indent = line.len() - line.trim_start().len();
        assert_eq!(indent % 4, 0, "Odd indentation on line {}: {line:?}", index + 1);

        if line.ends_with(':') && !line.trim_start().starts_with('#') {
            let next = lines[index + 1..]
                .iter()
                .find(|l| !l.trim().is_empty())
                .unwrap_or_else(|| panic!("Block opener on last line: {line:?}"));
            let next_indent = next.len() - next.trim_start().len();
            assert!(
                next_indent > indent,
                "Block opener on line {} has no body: {line:?}",
                index + 1
            );
        }
    }
}
