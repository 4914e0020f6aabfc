use std::path::PathBuf;

const WINDOW_SIZE_TREE: &str = "window_size";
const WINDOW_SIZE_KEY_WIDTH: &str = "width";
const WINDOW_SIZE_KEY_HEIGHT: &str = "height";
const LOCAL_STATE_DB_DIR_NAME: &str = "state_db";

fn db_path() -> PathBuf {
    crate::logger::app_state_dir()
        .map(|dir| dir.join(LOCAL_STATE_DB_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(LOCAL_STATE_DB_DIR_NAME))
}

/// Opens the tree that remembers the last window size.
///
/// Only window geometry lives here; zoom and scroll position are never stored.
pub fn open_store() -> Option<sled::Tree> {
    let db_path = db_path();
    if let Some(parent) = db_path.parent()
        && let Err(err) = std::fs::create_dir_all(parent)
    {
        crate::debug_log!("[store] create dir failed: {} | {}", parent.display(), err);
        return None;
    }

    let db = match sled::open(&db_path) {
        Ok(db) => db,
        Err(err) => {
            crate::debug_log!("[store] open db failed: {} | {}", db_path.display(), err);
            return None;
        }
    };

    match db.open_tree(WINDOW_SIZE_TREE) {
        Ok(tree) => Some(tree),
        Err(err) => {
            crate::debug_log!("[store] open tree failed: {} | {}", WINDOW_SIZE_TREE, err);
            None
        }
    }
}

fn decode_dimension(bytes: &[u8]) -> Option<f32> {
    let value = f32::from_be_bytes(bytes.try_into().ok()?);
    (value.is_finite() && value > 0.0).then_some(value)
}

pub fn load(store: &sled::Tree) -> Option<(f32, f32)> {
    let width = store.get(WINDOW_SIZE_KEY_WIDTH).ok().flatten()?;
    let height = store.get(WINDOW_SIZE_KEY_HEIGHT).ok().flatten()?;
    Some((decode_dimension(&width)?, decode_dimension(&height)?))
}

pub fn save(store: &sled::Tree, width: f32, height: f32) {
    let result = store
        .insert(WINDOW_SIZE_KEY_WIDTH, width.to_be_bytes().as_slice())
        .and_then(|_| store.insert(WINDOW_SIZE_KEY_HEIGHT, height.to_be_bytes().as_slice()))
        .and_then(|_| store.flush());
    if let Err(err) = result {
        crate::debug_log!("[store] save window size failed: {}x{} | {}", width, height, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_tree() -> sled::Tree {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .expect("temporary sled db");
        db.open_tree(WINDOW_SIZE_TREE).expect("tree")
    }

    #[test]
    fn saved_size_round_trips() {
        let tree = temp_tree();
        assert_eq!(load(&tree), None);
        save(&tree, 1280.0, 800.0);
        assert_eq!(load(&tree), Some((1280.0, 800.0)));
    }

    #[test]
    fn rejects_malformed_dimensions() {
        assert_eq!(decode_dimension(&[0, 1]), None);
        assert_eq!(decode_dimension(&0.0f32.to_be_bytes()), None);
        assert_eq!(decode_dimension(&(-5.0f32).to_be_bytes()), None);
        assert_eq!(decode_dimension(&f32::NAN.to_be_bytes()), None);
        assert_eq!(decode_dimension(&640.0f32.to_be_bytes()), Some(640.0));
    }
}
