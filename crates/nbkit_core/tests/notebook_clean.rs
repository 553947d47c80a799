use nbkit_core::{
    clean_notebook, normalize_notebook, read_notebook, to_canonical_json, CellKind, Notebook,
    NotebookError,
};
use serde_json::{json, Value};
use std::path::Path;

fn sample_notebook() -> Value {
    json!({
        "cells": [
            {
                "cell_type": "markdown",
                "id": "intro",
                "metadata": {"tags": ["intro"]},
                "source": ["# Title\n", "Some text"]
            },
            {
                "cell_type": "code",
                "execution_count": 5,
                "id": "calc",
                "metadata": {"foo": 1, "collapsed": false},
                "outputs": [{"output_type": "stream", "name": "stdout", "text": "hi"}],
                "source": "print('hi')"
            },
            {
                "cell_type": "raw",
                "metadata": {"format": "text/plain"},
                "source": "raw text"
            }
        ],
        "metadata": {
            "kernelspec": {"display_name": "Python 3", "language": "python", "name": "python3"},
            "language_info": {"name": "python", "version": "3.11.4"},
            "widgets": {"state": {}},
            "toc": {"number_sections": true}
        },
        "nbformat": 4,
        "nbformat_minor": 5
    })
}

fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn clean_strips_outputs_counters_and_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analysis.ipynb");
    write_json(&path, &sample_notebook());

    let stats = clean_notebook(&path).unwrap();
    assert_eq!(stats.code_cells_cleared, 1);
    assert_eq!(stats.cells_metadata_reset, 3);
    assert_eq!(stats.metadata_keys_dropped, 2);

    let cleaned = read_json(&path);
    let cells = cleaned["cells"].as_array().unwrap();
    for cell in cells {
        assert_eq!(cell["metadata"], json!({}));
    }

    let code = &cells[1];
    assert_eq!(code["outputs"], json!([]));
    assert!(code["execution_count"].is_null());
    assert_eq!(code["source"], json!(["print('hi')"]));
    assert_eq!(code["id"], "calc");

    assert!(cells[0].get("outputs").is_none());
    assert!(cells[0].get("execution_count").is_none());
    assert_eq!(cells[0]["source"], json!(["# Title\n", "Some text"]));

    assert_eq!(
        cleaned["metadata"],
        json!({
            "kernelspec": {"display_name": "Python 3", "language": "python", "name": "python3"},
            "language_info": {"name": "python", "version": "3.11.4"}
        })
    );
    assert_eq!(cleaned["nbformat"], 4);
    assert_eq!(cleaned["nbformat_minor"], 5);
}

#[test]
fn single_code_cell_scenario() {
    let mut notebook: Notebook = serde_json::from_value(json!({
        "cells": [{
            "cell_type": "code",
            "execution_count": 5,
            "metadata": {"foo": 1},
            "outputs": [{"text": "hi"}],
            "source": ""
        }],
        "metadata": {"kernelspec": {"name": "python3"}, "extra": "x"},
        "nbformat": 4,
        "nbformat_minor": 4
    }))
    .unwrap();

    normalize_notebook(&mut notebook);

    let cell = &notebook.cells[0];
    assert_eq!(cell.cell_type, CellKind::Code);
    assert_eq!(cell.outputs, Some(Vec::new()));
    assert_eq!(cell.execution_count(), None);
    assert!(cell.metadata.is_empty());
    assert_eq!(
        Value::Object(notebook.metadata.clone()),
        json!({"kernelspec": {"name": "python3"}, "language_info": {}})
    );
}

#[test]
fn code_cell_without_execution_fields_gains_them() {
    let mut notebook: Notebook = serde_json::from_value(json!({
        "cells": [{"cell_type": "code", "metadata": {}, "source": "x = 1"}],
        "metadata": {},
        "nbformat": 4,
        "nbformat_minor": 2
    }))
    .unwrap();

    normalize_notebook(&mut notebook);

    let rendered: Value = serde_json::from_str(&to_canonical_json(&notebook).unwrap()).unwrap();
    assert_eq!(rendered["cells"][0]["outputs"], json!([]));
    assert!(rendered["cells"][0]["execution_count"].is_null());
    assert_eq!(
        rendered["metadata"],
        json!({"kernelspec": {}, "language_info": {}})
    );
}

#[test]
fn cleaning_twice_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("twice.ipynb");
    write_json(&path, &sample_notebook());

    clean_notebook(&path).unwrap();
    let first = std::fs::read(&path).unwrap();
    let second_stats = clean_notebook(&path).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(second_stats.metadata_keys_dropped, 0);
}

#[test]
fn normalize_is_idempotent_on_the_model() {
    let mut once: Notebook = serde_json::from_value(sample_notebook()).unwrap();
    normalize_notebook(&mut once);
    let mut twice = once.clone();
    normalize_notebook(&mut twice);

    assert_eq!(once, twice);
}

#[test]
fn cleaned_file_ends_with_newline_and_keeps_unicode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unicode.ipynb");
    write_json(
        &path,
        &json!({
            "cells": [{"cell_type": "markdown", "metadata": {}, "source": "naïve café ✓"}],
            "metadata": {},
            "nbformat": 4,
            "nbformat_minor": 5
        }),
    );

    clean_notebook(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.ends_with("}\n"));
    assert!(text.contains("naïve café ✓"));
    assert!(text.starts_with("{\n \"cells\": [\n  {\n"));
}

#[test]
fn malformed_json_is_a_parse_error_and_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.ipynb");
    std::fs::write(&path, "{\"cells\": [").unwrap();

    let err = clean_notebook(&path).unwrap_err();
    assert!(matches!(err, NotebookError::Parse { .. }), "got {err}");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"cells\": [");
}

#[test]
fn json_without_cells_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-a-notebook.ipynb");
    write_json(&path, &json!({"hello": "world"}));

    let err = read_notebook(&path).unwrap_err();
    assert!(matches!(err, NotebookError::Parse { .. }));
}

#[test]
fn older_nbformat_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v3.ipynb");
    write_json(
        &path,
        &json!({"cells": [], "metadata": {}, "nbformat": 3, "nbformat_minor": 0}),
    );

    match clean_notebook(&path).unwrap_err() {
        NotebookError::UnsupportedVersion { nbformat, .. } => assert_eq!(nbformat, 3),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = clean_notebook(dir.path().join("absent.ipynb")).unwrap_err();
    assert!(matches!(err, NotebookError::Read { .. }));
}

#[test]
fn string_and_line_list_sources_clean_to_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let as_string = dir.path().join("string.ipynb");
    let as_list = dir.path().join("list.ipynb");
    let notebook_with = |source: Value| {
        json!({
            "cells": [{
                "cell_type": "code",
                "execution_count": 1,
                "metadata": {},
                "outputs": [],
                "source": source
            }],
            "metadata": {},
            "nbformat": 4,
            "nbformat_minor": 5
        })
    };
    write_json(&as_string, &notebook_with(json!("a = 1\nb = 2")));
    write_json(&as_list, &notebook_with(json!(["a = 1\n", "b = 2"])));

    clean_notebook(&as_string).unwrap();
    clean_notebook(&as_list).unwrap();

    assert_eq!(
        std::fs::read(&as_string).unwrap(),
        std::fs::read(&as_list).unwrap()
    );
    assert_eq!(
        read_json(&as_string)["cells"][0]["source"],
        json!(["a = 1\n", "b = 2"])
    );
}

#[test]
fn large_integers_in_kept_metadata_stay_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.ipynb");
    std::fs::write(
        &path,
        r#"{"cells": [{"cell_type": "raw", "metadata": {}, "source": "", "id": 123456789012345678901234}],
            "metadata": {"language_info": {"n": 123456789012345678901234}, "extra": 1},
            "nbformat": 4, "nbformat_minor": 5}"#,
    )
    .unwrap();

    clean_notebook(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"n\": 123456789012345678901234"), "{text}");
    assert!(text.contains("\"id\": 123456789012345678901234"), "{text}");
    assert!(!text.contains("e+23"));
}
