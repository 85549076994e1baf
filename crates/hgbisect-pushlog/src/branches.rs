//! Branch name resolution for hg.mozilla.org repositories.
//!
//! The bisection frontend lets users name branches by short aliases; this
//! maps those names to the repository URLs push-log queries run against.

use crate::error::{PushlogError, Result};

const HG_BASE: &str = "https://hg.mozilla.org";

/// Canonical branch name for `branch`, resolving known aliases.
fn canonical_name(branch: &str) -> &str {
    match branch {
        "central" | "m-c" => "mozilla-central",
        "inbound" | "m-i" => "mozilla-inbound",
        "aurora" => "mozilla-aurora",
        "beta" => "mozilla-beta",
        "release" => "mozilla-release",
        other => other,
    }
}

/// Repository URL for a named branch.
///
/// Integration branches live under `integration/`, release trains under
/// `releases/`, mozilla-central at the repository root.
pub fn get_url(branch: &str) -> Result<String> {
    let name = canonical_name(branch);
    let path = match name {
        "mozilla-central" => name.to_string(),
        "mozilla-inbound" | "autoland" | "fx-team" => format!("integration/{name}"),
        "mozilla-aurora" | "mozilla-beta" | "mozilla-release" => format!("releases/{name}"),
        esr if esr.starts_with("mozilla-esr") => format!("releases/{esr}"),
        _ => {
            return Err(PushlogError::UnknownBranch {
                branch: branch.to_string(),
            })
        }
    };
    Ok(format!("{HG_BASE}/{path}"))
}
