#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    pub chars_per_point: CharDimensions,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            chars_per_point: CharDimensions::new(1, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharDimensions {
    pub horizontal: usize,
    pub vertical: usize,
}

impl CharDimensions {
    pub fn new(horizontal: usize, vertical: usize) -> Self {
        Self { horizontal, vertical }
    }
}

/// Character canvas addressed in 0-based board cells.
pub struct CharGrid {
    grid: Vec<Vec<char>>,
    cells_wide: usize,
    cells_high: usize,
    char_dims: CharDimensions,
}

impl CharGrid {
    pub fn new(cells_wide: usize, cells_high: usize, char_dims: CharDimensions, fill: &CharPattern) -> Self {
        let mut grid = Self {
            grid: vec![vec![' '; cells_wide * char_dims.horizontal]; cells_high * char_dims.vertical],
            cells_wide,
            cells_high,
            char_dims,
        };
        for y in 0..cells_high {
            for x in 0..cells_wide {
                grid.set_cell(x, y, fill);
            }
        }
        grid
    }

    /// Writes `pattern` into a cell; anything past the edge is clipped.
    pub fn set_cell(&mut self, x: usize, y: usize, pattern: &CharPattern) {
        if x >= self.cells_wide || y >= self.cells_high {
            return;
        }
        let start_x = x * self.char_dims.horizontal;
        let start_y = y * self.char_dims.vertical;

        for (dy, row) in pattern.chars.iter().enumerate().take(self.char_dims.vertical) {
            for (dx, &ch) in row.iter().enumerate().take(self.char_dims.horizontal) {
                self.grid[start_y + dy][start_x + dx] = ch;
            }
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        self.grid
            .get(y * self.char_dims.vertical)?
            .get(x * self.char_dims.horizontal)
            .copied()
    }

    pub fn into_lines(self) -> Vec<Vec<char>> {
        self.grid
    }

    /// Rows joined with a space between characters, the way the line prompt prints them.
    pub fn to_spaced_rows(&self) -> Vec<String> {
        self.grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(char::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    pub fn physical_width(&self) -> usize {
        self.cells_wide * self.char_dims.horizontal
    }

    pub fn physical_height(&self) -> usize {
        self.cells_high * self.char_dims.vertical
    }
}

#[derive(Clone, Debug)]
pub struct CharPattern {
    pub chars: Vec<Vec<char>>,
}

impl CharPattern {
    pub fn single(ch: char, dims: CharDimensions) -> Self {
        Self {
            chars: vec![vec![ch; dims.horizontal]; dims.vertical],
        }
    }
}
