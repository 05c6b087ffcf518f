use std::{
    fs,
    io::{self, Read},
};

use anyhow::{Context, Result};

pub mod blob_error;
pub mod delete;
pub mod get;
pub mod inspect;
pub mod put;

/// Read a blob from the file at `path` or from standard input if `path`
/// is `-`
pub(crate) fn read_blob(path: &str) -> Result<Vec<u8>> {
    if path == "-" {
        let mut blob = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut blob)
            .context("Unable to read blob from standard input")?;
        Ok(blob)
    } else {
        fs::read(path).with_context(|| format!("Unable to read blob from `{path}'"))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use assertor::{assert_that, ResultAssertion};
    use pretty_assertions::assert_eq;
    use spatia_core::{
        codec::encode,
        geometry::{LineString, Point},
    };
    use tempdir::TempDir;
    use ulid::Ulid;

    use super::{
        delete::{run_delete, DeleteArgs},
        get::{run_get, GetArgs},
        put::{run_put, PutArgs},
        read_blob,
    };

    fn blob() -> Vec<u8> {
        let line = LineString::new(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]).unwrap();
        encode(&line.into()).unwrap()
    }

    #[test]
    fn read_blob_from_file() {
        let dir = TempDir::new("spatia_cli").unwrap();
        let path = dir.path().join("line.blob");
        fs::write(&path, blob()).unwrap();

        assert_eq!(read_blob(path.to_str().unwrap()).unwrap(), blob());
        assert_that!(read_blob(dir.path().join("missing").to_str().unwrap())).is_err();
    }

    #[test]
    fn put_get_delete() {
        let dir = TempDir::new("spatia_cli").unwrap();
        let store = dir.path().join("store");
        let store = store.to_str().unwrap();
        let input = dir.path().join("in.blob");
        let output = dir.path().join("out.blob");
        fs::write(&input, blob()).unwrap();

        let id = Ulid::new();
        run_put(
            store,
            PutArgs {
                column: "shape".to_string(),
                file: input.to_str().unwrap().to_string(),
                id: Some(id),
            },
        )
        .unwrap();

        let get = |output: &std::path::Path| {
            run_get(
                store,
                GetArgs {
                    column: "shape".to_string(),
                    id,
                    output: Some(output.to_path_buf()),
                },
            )
        };
        get(&output).unwrap();
        assert_eq!(fs::read(&output).unwrap(), blob());

        run_delete(
            store,
            DeleteArgs {
                column: "shape".to_string(),
                ids: vec![id],
            },
        )
        .unwrap();
        assert_that!(get(&output)).is_err();
    }

    #[test]
    fn put_rejects_invalid_blob() {
        let dir = TempDir::new("spatia_cli").unwrap();
        let store = dir.path().join("store");
        let input = dir.path().join("broken.blob");
        let mut broken = blob();
        broken[0] = 0xff;
        fs::write(&input, broken).unwrap();

        let result = run_put(
            store.to_str().unwrap(),
            PutArgs {
                column: "shape".to_string(),
                file: input.to_str().unwrap().to_string(),
                id: None,
            },
        );
        assert_that!(result).is_err();
        // the store is never opened for invalid input
        assert!(!store.exists());
    }
}
