#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// Resolved grid geometry: fixed column count over a measured container.
///
/// Only constructible once layout is actually known (positive columns,
/// positive measured width), so callers gate on `Option<GridLayout>` instead
/// of checking for degenerate cell sizes at every use site.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    columns: usize,
    container: Size,
    cell: Size,
}

impl GridLayout {
    /// Cell width is the container width split across columns; cell height
    /// defaults to a square cell unless a fixed item height is given.
    pub fn new(columns: usize, container: Size, item_height: Option<f32>) -> Option<Self> {
        if columns == 0 || container.width <= 0.0 {
            return None;
        }
        let cell_w = container.width / columns as f32;
        let cell_h = item_height.unwrap_or(cell_w);
        Some(Self {
            columns,
            container,
            cell: Size {
                width: cell_w,
                height: cell_h,
            },
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn cell(&self) -> Size {
        self.cell
    }

    /// Row-major cell origin for an order index.
    pub fn position_for_order(&self, order: usize) -> Vec2 {
        Vec2 {
            x: (order % self.columns) as f32 * self.cell.width,
            y: (order / self.columns) as f32 * self.cell.height,
        }
    }

    /// Order index of the cell whose origin is nearest to `p`, clamped to
    /// `[0, count)`. Inverse of `position_for_order` for on-grid points.
    pub fn order_near(&self, p: Vec2, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        let col = (p.x / self.cell.width + 0.5).floor().max(0.0) as usize;
        let row = (p.y / self.cell.height + 0.5).floor().max(0.0) as usize;
        let col = col.min(self.columns - 1);
        (row * self.columns + col).min(count - 1)
    }

    /// Clamp a drag x so the cell stays inside the container horizontally.
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(0.0, (self.container.width - self.cell.width).max(0.0))
    }

    pub fn cell_rect(&self, origin: Vec2) -> Rect {
        Rect {
            x: origin.x,
            y: origin.y,
            w: self.cell.width,
            h: self.cell.height,
        }
    }
}
