use std::fs;
use std::io;
use std::path::PathBuf;

use directories::UserDirs;
use uuid::Uuid;

use crate::board::Board;
use crate::config::SAVE_FOLDER;
use crate::topology::EdgeConfig;

/// Text saved for an accepted board: the board north first, then the edge
/// directives it was accepted under.
pub fn render_position(board: &Board, edges: &EdgeConfig) -> String {
    format!("{board}\nedges {edges}\n")
}

/// `<md5 of the text>_<session>.txt`, so identical boards from one session
/// overwrite rather than pile up.
pub fn position_filename(contents: &str, session: Uuid) -> String {
    format!("{:x}_{}.txt", md5::compute(contents), session.simple())
}

/// Writes the board under the user's documents folder. Returns the path,
/// or `None` when the platform has no documents folder.
pub fn save_position(board: &Board, edges: &EdgeConfig, session: Uuid) -> io::Result<Option<PathBuf>> {
    let Some(dirs) = UserDirs::new() else {
        return Ok(None);
    };
    let Some(documents) = dirs.document_dir() else {
        return Ok(None);
    };

    let contents = render_position(board, edges);
    let mut path = documents.join(SAVE_FOLDER);
    fs::create_dir_all(&path)?;
    path.push(position_filename(&contents, session));
    fs::write(&path, contents)?;
    Ok(Some(path))
}
