//! Logging helpers shared by the library and the programs built on it.

/// Provides the recommended log filter for programs which want to exclude noisy details
/// of Flatland’s dependencies.
///
/// The guiding principle for this filtering is that at [`log::Level::Debug`] or lower level,
/// there should be no messages produced every step unless something is wrong.
#[allow(clippy::missing_inline_in_public_items)]
pub fn standard_filter(metadata: &log::Metadata<'_>) -> bool {
    let target = metadata.target();

    !(target.starts_with("serde_json") // never useful to us
        || target.starts_with("criterion")) // benchmark harness chatter
}
