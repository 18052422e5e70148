use super::*;

fn grid(rows: &[&[i64]]) -> Grid {
    Grid::from_rows(rows.iter().copied()).unwrap()
}

#[test]
fn from_rows_keeps_row_major_order() {
    let g = grid(&[&[0, 1, 2], &[3, 4, 5]]);
    assert_eq!(g.shape(), (2, 3));
    assert_eq!(g.cells(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(g.get(1, 0), Some(3));
    assert_eq!(g.get(2, 0), None);
    assert_eq!(g.get(0, 3), None);
    assert_eq!(g.row(1), Some(&[3, 4, 5][..]));
    assert_eq!(g.to_rows(), vec![vec![0, 1, 2], vec![3, 4, 5]]);
}

#[test]
fn from_rows_rejects_ragged_rows() {
    let err = Grid::from_rows([&[0i64, 1][..], &[1][..]]).unwrap_err();
    match err {
        GridGifError::RaggedGrid {
            row,
            expected,
            found,
            line,
            ..
        } => {
            assert_eq!(row, 1);
            assert_eq!(expected, 2);
            assert_eq!(found, 1);
            assert_eq!(line, None);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn from_rows_rejects_empty_shapes() {
    let no_rows: Vec<Vec<i64>> = Vec::new();
    assert!(Grid::from_rows(no_rows).is_err());
    assert!(Grid::from_rows([Vec::<i64>::new()]).is_err());
}

#[test]
fn sequence_preserves_order() {
    let seq: GridSequence = vec![grid(&[&[1]]), grid(&[&[2]]), grid(&[&[3]])].into();
    assert_eq!(seq.len(), 3);
    let firsts: Vec<i64> = seq.iter().map(|g| g.cells()[0]).collect();
    assert_eq!(firsts, vec![1, 2, 3]);
    assert!(GridSequence::new().is_empty());
}
