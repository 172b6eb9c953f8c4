//! Directory traversal through `cap-std`.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

/// Every regular file under `root` whose name satisfies `keep`, sorted.
///
/// Subdirectories are visited only when `recurse` is set.
pub(super) fn files(
    root: &Utf8Path,
    recurse: bool,
    keep: &dyn Fn(&Utf8Path) -> bool,
) -> std::io::Result<Vec<Utf8PathBuf>> {
    let dir = Dir::open_ambient_dir(root, ambient_authority())?;
    let mut out = Vec::new();
    visit(&dir, root, recurse, keep, &mut out)?;
    out.sort();
    Ok(out)
}

fn visit(
    dir: &Dir,
    prefix: &Utf8Path,
    recurse: bool,
    keep: &dyn Fn(&Utf8Path) -> bool,
    out: &mut Vec<Utf8PathBuf>,
) -> std::io::Result<()> {
    for item in dir.entries()? {
        let entry = item?;
        let name = entry.file_name()?;
        let path = prefix.join(&name);
        if entry.file_type()?.is_dir() {
            if recurse {
                visit(&dir.open_dir(&name)?, &path, recurse, keep, out)?;
            }
        } else if keep(&path) {
            out.push(path);
        }
    }
    Ok(())
}

/// Read `path` through a capability handle on its parent directory.
pub(super) fn read(path: &Utf8Path) -> std::io::Result<String> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other(format!("'{path}' does not name a file")))?;
    Dir::open_ambient_dir(parent, ambient_authority())?.read_to_string(name)
}
