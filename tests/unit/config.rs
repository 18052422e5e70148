use super::*;

#[test]
fn empty_object_uses_defaults() {
    let cfg = ConvertConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, ConvertConfig::default());
    assert!(cfg.loop_forever);
    assert_eq!(cfg.cell_size, 10);
    assert_eq!(cfg.effective_fps().unwrap(), Fps::new(10, 1).unwrap());
    assert_eq!(
        cfg.marker_set().unwrap(),
        MarkerSet::new([ITERATION_MARKER, STEP_MARKER]).unwrap()
    );
    cfg.validate().unwrap();
}

#[test]
fn parses_full_config() {
    let json = r##"{
        "palette": {"0": "yellow", "1": "pink"},
        "fps": {"num": 1, "den": 1},
        "loop": false,
        "markers": ["Iteration"],
        "cell_size": 3,
        "out_dir": "gifs",
        "inputs": ["a.txt", "b.txt"],
        "parallel": true,
        "threads": 2
    }"##;
    let cfg = ConvertConfig::from_reader(json.as_bytes()).unwrap();
    assert!(!cfg.loop_forever);
    assert_eq!(cfg.palette.get(1), Some(crate::Rgb8::new(255, 192, 203)));
    assert_eq!(cfg.inputs.len(), 2);
    assert_eq!(cfg.threads, Some(2));

    let opts = cfg.encode_opts().unwrap();
    assert_eq!(opts.fps, Fps::new(1, 1).unwrap());
    assert_eq!(opts.cell_size, 3);
    assert!(!opts.loop_forever);
}

#[test]
fn frame_ms_overrides_fps() {
    let cfg = ConvertConfig::from_reader(r#"{"frame_ms": 500}"#.as_bytes()).unwrap();
    assert_eq!(
        cfg.effective_fps().unwrap().frame_duration(),
        std::time::Duration::from_millis(500)
    );
}

#[test]
fn unknown_fields_and_bad_values_are_rejected() {
    assert!(ConvertConfig::from_reader(r#"{"colour": "red"}"#.as_bytes()).is_err());

    let zero_cell = ConvertConfig {
        cell_size: 0,
        ..ConvertConfig::default()
    };
    assert!(zero_cell.validate().is_err());

    let no_markers = ConvertConfig {
        markers: Vec::new(),
        ..ConvertConfig::default()
    };
    assert!(no_markers.validate().is_err());

    let zero_ms = ConvertConfig {
        frame_ms: Some(0),
        ..ConvertConfig::default()
    };
    assert!(zero_ms.validate().is_err());

    let zero_threads = ConvertConfig {
        threads: Some(0),
        ..ConvertConfig::default()
    };
    assert!(zero_threads.validate().is_err());
}

#[test]
fn from_path_resolves_relative_paths() {
    let dir = PathBuf::from("target").join("config_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cfg.json");
    std::fs::write(&path, r#"{"inputs": ["run.txt", "/abs/run.txt"], "out_dir": "gifs"}"#)
        .unwrap();

    let cfg = ConvertConfig::from_path(&path).unwrap();
    assert_eq!(cfg.inputs[0], dir.join("run.txt"));
    assert_eq!(cfg.inputs[1], PathBuf::from("/abs/run.txt"));
    assert_eq!(cfg.out_dir, Some(dir.join("gifs")));
}
