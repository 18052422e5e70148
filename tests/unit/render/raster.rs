use super::*;
use crate::foundation::core::Rgb8;

const YELLOW: [u8; 4] = [255, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn grid(rows: &[&[i64]]) -> Grid {
    Grid::from_rows(rows.iter().copied()).unwrap()
}

#[test]
fn one_pixel_per_cell_is_row_major() {
    let f = render_grid(&grid(&[&[0, 1], &[1, 0]]), 0, &Palette::default(), 1).unwrap();
    assert_eq!((f.width, f.height), (2, 2));
    assert_eq!(f.pixel(0, 0), Some(YELLOW));
    assert_eq!(f.pixel(1, 0), Some(BLUE));
    assert_eq!(f.pixel(0, 1), Some(BLUE));
    assert_eq!(f.pixel(1, 1), Some(YELLOW));
    assert_eq!(f.pixel(2, 0), None);
}

#[test]
fn cells_scale_with_hard_edges() {
    let f = render_grid(&grid(&[&[0, 1, 0]]), 0, &Palette::default(), 4).unwrap();
    assert_eq!((f.width, f.height), (12, 4));
    for y in 0..4 {
        for x in 0..12 {
            let expected = if (4..8).contains(&x) { BLUE } else { YELLOW };
            assert_eq!(f.pixel(x, y), Some(expected), "pixel ({x},{y})");
        }
    }
}

#[test]
fn aspect_ratio_follows_grid_shape() {
    let g = grid(&[&[0, 0, 0, 0, 0], &[1, 1, 1, 1, 1]]);
    let (w, h) = frame_dimensions(&g, 7).unwrap();
    assert_eq!((w, h), (35, 14));
    assert_eq!(w * 2, h * 5);
}

#[test]
fn unmapped_value_fails_with_location() {
    let err = render_grid(&grid(&[&[0, 1], &[2, 0]]), 4, &Palette::default(), 2).unwrap_err();
    assert!(matches!(
        err,
        GridGifError::PaletteLookup {
            grid: 4,
            row: 1,
            col: 0,
            value: 2
        }
    ));
}

#[test]
fn zero_cell_size_is_rejected() {
    assert!(render_grid(&grid(&[&[0]]), 0, &Palette::default(), 0).is_err());
}

#[test]
fn custom_palette_colors_are_used() {
    let palette = Palette::new([(3, Rgb8::new(10, 20, 30))]).unwrap();
    let f = render_grid(&grid(&[&[3]]), 0, &palette, 1).unwrap();
    assert_eq!(f.data, vec![10, 20, 30, 255]);
    let img = f.to_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
}
