/// Single coordinate axis used for board side and positions.
pub type Coord = u8;

/// Linear cell index in row-major order.
pub type CellIndex = u8;

/// Count type used for total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Splits a linear index into `(x, y)` on a board of the given side.
pub const fn index_to_coords(index: CellIndex, side: Coord) -> Coord2 {
    (index % side, index / side)
}

pub const fn coords_to_index((x, y): Coord2, side: Coord) -> CellIndex {
    y * side + x
}
