use super::*;

const YELLOW: Rgb8 = Rgb8::new(255, 255, 0);
const BLUE: Rgb8 = Rgb8::new(0, 0, 255);

#[test]
fn parses_names_and_hex() {
    assert_eq!(parse_color("yellow").unwrap(), YELLOW);
    assert_eq!(parse_color(" Blue ").unwrap(), BLUE);
    assert_eq!(parse_color("#FFC0CB").unwrap(), Rgb8::new(255, 192, 203));
    assert!(parse_color("#fff").is_err());
    assert!(parse_color("#gg0000").is_err());
    assert!(parse_color("chartreuse-ish").is_err());
}

#[test]
fn default_is_yellow_blue() {
    let p = Palette::default();
    assert_eq!(p.len(), 2);
    assert_eq!(p.get(0), Some(YELLOW));
    assert_eq!(p.get(1), Some(BLUE));
    assert_eq!(p.get(2), None);
}

#[test]
fn spec_strings_explicit_and_indexed() {
    let p = Palette::parse_spec("0=yellow, 1=#0000ff, 5=pink").unwrap();
    assert_eq!(p.get(1), Some(BLUE));
    assert_eq!(p.get(5), Some(Rgb8::new(255, 192, 203)));
    assert_eq!(p.get(2), None);

    let p = Palette::parse_spec("yellow,pink").unwrap();
    assert_eq!(p.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec![0, 1]);

    assert!(Palette::parse_spec("").is_err());
    assert!(Palette::parse_spec("0=yellow,blue").is_err());
    assert!(Palette::parse_spec("a=yellow").is_err());
    assert!(Palette::parse_spec("0=yellow,0=blue").is_err());
}

#[test]
fn deserializes_map_and_list_forms() {
    let p: Palette =
        serde_json::from_str(r##"{"0": "yellow", "1": [0, 0, 255], "-1": "#000000"}"##).unwrap();
    assert_eq!(p.get(0), Some(YELLOW));
    assert_eq!(p.get(1), Some(BLUE));
    assert_eq!(p.get(-1), Some(Rgb8::new(0, 0, 0)));

    let p: Palette = serde_json::from_str(r#"["yellow", "blue"]"#).unwrap();
    assert_eq!(p, Palette::default());

    assert!(serde_json::from_str::<Palette>(r#"{"x": "yellow"}"#).is_err());
    assert!(serde_json::from_str::<Palette>(r#"{"0": "nope"}"#).is_err());
    assert!(serde_json::from_str::<Palette>("[]").is_err());
}

#[test]
fn check_grid_reports_first_missing_value() {
    let grid = Grid::from_rows([&[0i64, 1][..], &[1, 7][..]]).unwrap();
    let err = Palette::default().check_grid(3, &grid).unwrap_err();
    match err {
        GridGifError::PaletteLookup {
            grid,
            row,
            col,
            value,
        } => {
            assert_eq!((grid, row, col, value), (3, 1, 1, 7));
        }
        other => panic!("unexpected error: {other}"),
    }

    let ok = Grid::from_rows([&[0i64, 1][..]]).unwrap();
    assert!(Palette::default().check_grid(0, &ok).is_ok());
}
