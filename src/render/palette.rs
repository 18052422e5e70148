use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::Error as _;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{GridGifError, GridGifResult};
use crate::grid::model::Grid;

const NAMED: &[(&str, Rgb8)] = &[
    ("black", Rgb8::new(0, 0, 0)),
    ("white", Rgb8::new(255, 255, 255)),
    ("gray", Rgb8::new(128, 128, 128)),
    ("grey", Rgb8::new(128, 128, 128)),
    ("red", Rgb8::new(255, 0, 0)),
    ("green", Rgb8::new(0, 128, 0)),
    ("blue", Rgb8::new(0, 0, 255)),
    ("yellow", Rgb8::new(255, 255, 0)),
    ("pink", Rgb8::new(255, 192, 203)),
    ("orange", Rgb8::new(255, 165, 0)),
    ("purple", Rgb8::new(128, 0, 128)),
    ("cyan", Rgb8::new(0, 255, 255)),
    ("magenta", Rgb8::new(255, 0, 255)),
];

/// Parse a color from a name (`"yellow"`) or `#RRGGBB` hex.
pub fn parse_color(s: &str) -> Result<Rgb8, String> {
    let s = s.trim();
    if let Some((_, c)) = NAMED.iter().find(|(name, _)| name.eq_ignore_ascii_case(s)) {
        return Ok(*c);
    }
    let Some(hex) = s.strip_prefix('#') else {
        return Err(format!("unknown color \"{s}\" (use a name or #RRGGBB)"));
    };
    if hex.len() != 6 || !hex.is_ascii() {
        return Err("hex color must be #RRGGBB (case-insensitive)".to_owned());
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    Ok(Rgb8::new(
        hex_byte(&hex[0..2])?,
        hex_byte(&hex[2..4])?,
        hex_byte(&hex[4..6])?,
    ))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Text(String),
    Arr([u8; 3]),
}

impl ColorRepr {
    fn into_rgb(self) -> Result<Rgb8, String> {
        match self {
            Self::Text(s) => parse_color(&s),
            Self::Arr([r, g, b]) => Ok(Rgb8::new(r, g, b)),
        }
    }
}

/// Fixed mapping from cell value to display color.
///
/// Entries are kept ordered by cell value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: BTreeMap<i64, Rgb8>,
}

impl Palette {
    /// Build from explicit `(value, color)` pairs. Duplicate values are rejected.
    pub fn new(entries: impl IntoIterator<Item = (i64, Rgb8)>) -> GridGifResult<Self> {
        let mut map = BTreeMap::new();
        for (value, color) in entries {
            if map.insert(value, color).is_some() {
                return Err(GridGifError::validation(format!(
                    "palette has duplicate entry for value {value}"
                )));
            }
        }
        if map.is_empty() {
            return Err(GridGifError::validation("palette must not be empty"));
        }
        Ok(Self { entries: map })
    }

    /// Map `colors[i]` to value `i`.
    pub fn indexed(colors: impl IntoIterator<Item = Rgb8>) -> GridGifResult<Self> {
        Self::new((0i64..).zip(colors))
    }

    /// Parse `"0=yellow,1=#0000ff"` (explicit values) or `"yellow,blue"` (indexed from 0).
    pub fn parse_spec(spec: &str) -> GridGifResult<Self> {
        let items: Vec<&str> = spec
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if items.iter().all(|s| !s.contains('=')) {
            let colors = items
                .iter()
                .map(|s| parse_color(s).map_err(GridGifError::validation))
                .collect::<GridGifResult<Vec<_>>>()?;
            return Self::indexed(colors);
        }

        let mut pairs = Vec::with_capacity(items.len());
        for item in items {
            let (k, v) = item.split_once('=').ok_or_else(|| {
                GridGifError::validation(format!(
                    "palette entry \"{item}\" must be VALUE=COLOR when any entry uses '='"
                ))
            })?;
            let value = k.trim().parse::<i64>().map_err(|_| {
                GridGifError::validation(format!("palette key \"{}\" is not an integer", k.trim()))
            })?;
            let color = parse_color(v).map_err(GridGifError::validation)?;
            pairs.push((value, color));
        }
        Self::new(pairs)
    }

    /// Color for `value`.
    pub fn get(&self, value: i64) -> Option<Rgb8> {
        self.entries.get(&value).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by value.
    pub fn iter(&self) -> impl Iterator<Item = (i64, Rgb8)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    /// Fail with [`GridGifError::PaletteLookup`] on the first unmapped cell (row-major).
    pub fn check_grid(&self, grid_index: usize, grid: &Grid) -> GridGifResult<()> {
        for (row, cells) in grid.iter_rows().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if !self.entries.contains_key(&value) {
                    return Err(GridGifError::PaletteLookup {
                        grid: grid_index,
                        row,
                        col,
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: BTreeMap::from([(0, Rgb8::new(255, 255, 0)), (1, Rgb8::new(0, 0, 255))]),
        }
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            List(Vec<ColorRepr>),
            Map(BTreeMap<String, ColorRepr>),
        }

        let entries: Vec<(i64, Rgb8)> = match Repr::deserialize(deserializer)? {
            Repr::List(colors) => (0i64..)
                .zip(colors)
                .map(|(k, c)| c.into_rgb().map(|c| (k, c)))
                .collect::<Result<Vec<_>, String>>()
                .map_err(D::Error::custom)?,
            Repr::Map(map) => {
                let mut out = Vec::with_capacity(map.len());
                for (k, c) in map {
                    let value = k.trim().parse::<i64>().map_err(|_| {
                        D::Error::custom(format!("palette key \"{k}\" is not an integer"))
                    })?;
                    out.push((value, c.into_rgb().map_err(D::Error::custom)?));
                }
                out
            }
        };
        Self::new(entries).map_err(D::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/palette.rs"]
mod tests;
