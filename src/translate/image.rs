// src/translate/image.rs

//! `runs-on` label -> container image mapping.

/// Image used when no table entry matches, or the job has no `runs-on`.
pub const DEFAULT_IMAGE: &str = "alpine:latest";

/// Ordered substring table; the first entry with a matching pattern wins.
const IMAGE_TABLE: &[(&[&str], &str)] = &[
    (&["ubuntu-22.04", "ubuntu-latest"], "ubuntu:22.04"),
    (&["ubuntu-20.04"], "ubuntu:20.04"),
    (&["ubuntu-24.04"], "ubuntu:24.04"),
];

/// Map a single run-environment label to an image reference.
pub fn map_image(label: &str) -> &'static str {
    IMAGE_TABLE
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| label.contains(p)))
        .map(|(_, image)| *image)
        .unwrap_or(DEFAULT_IMAGE)
}

/// Image for a job given its first `runs-on` label, if any.
pub fn image_for_runner(label: Option<&str>) -> &'static str {
    label.map(map_image).unwrap_or(DEFAULT_IMAGE)
}
