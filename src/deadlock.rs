use crate::data::{Pos, Tile};
use crate::vec2d::Vec2d;

/// Checks whether the box at `box_pos` sits in a locally dead pattern.
///
/// Two pattern families, each tried in all four rotations: a corner formed by
/// two walls on adjacent sides, and a 2x2 block where the box plus its two
/// orthogonal neighbors and the diagonal between them are all walls or boxes.
///
/// This is necessary but not sufficient - larger dead configurations pass
/// undetected, so a `false` result is not a solvability guarantee.
pub(crate) fn is_dead_after_push(tiles: &Vec2d<Tile>, box_pos: Pos) -> bool {
    let r = i16::from(box_pos.r);
    let c = i16::from(box_pos.c);
    let wall = |r, c| tile_at(tiles, r, c) == Tile::Wall;
    let blocked = |r, c| {
        matches!(
            tile_at(tiles, r, c),
            Tile::Wall | Tile::Box | Tile::BoxOnGoal
        )
    };

    // corner traps
    if wall(r - 1, c) && wall(r, c - 1) {
        return true;
    }
    if wall(r - 1, c) && wall(r, c + 1) {
        return true;
    }
    if wall(r + 1, c) && wall(r, c - 1) {
        return true;
    }
    if wall(r + 1, c) && wall(r, c + 1) {
        return true;
    }

    // 2x2 blocks
    if blocked(r - 1, c) && blocked(r, c - 1) && blocked(r - 1, c - 1) {
        return true;
    }
    if blocked(r - 1, c) && blocked(r, c + 1) && blocked(r - 1, c + 1) {
        return true;
    }
    if blocked(r + 1, c) && blocked(r, c - 1) && blocked(r + 1, c - 1) {
        return true;
    }
    if blocked(r + 1, c) && blocked(r, c + 1) && blocked(r + 1, c + 1) {
        return true;
    }

    false
}

/// Neighbor lookups outside the grid count as walls.
fn tile_at(tiles: &Vec2d<Tile>, r: i16, c: i16) -> Tile {
    if r < 0 || c < 0 || r >= i16::from(tiles.rows()) || c >= i16::from(tiles.cols()) {
        return Tile::Wall;
    }
    tiles
        .get(Pos::new(r as u8, c as u8))
        .copied()
        .unwrap_or(Tile::Wall)
}

#[cfg(test)]
mod tests {
    use crate::room::Room;

    use super::*;

    fn tiles_of(text: &str) -> Vec2d<Tile> {
        let room: Room = text.parse().unwrap();
        room.tiles.clone()
    }

    #[test]
    fn corner_rotations() {
        // a box in each corner of a closed room
        let tiles = tiles_of(
            r"
#######
#$   $#
#  @  #
#$   $#
#######
#....
",
        );
        assert!(is_dead_after_push(&tiles, Pos::new(1, 1)));
        assert!(is_dead_after_push(&tiles, Pos::new(1, 5)));
        assert!(is_dead_after_push(&tiles, Pos::new(3, 1)));
        assert!(is_dead_after_push(&tiles, Pos::new(3, 5)));
    }

    #[test]
    fn two_by_two_with_boxes() {
        // the pair against the top wall can never be separated
        let tiles = tiles_of(
            r"
#######
# $$  #
# @ ..#
#######
",
        );
        assert!(is_dead_after_push(&tiles, Pos::new(1, 2)));
        assert!(is_dead_after_push(&tiles, Pos::new(1, 3)));
    }

    #[test]
    fn two_by_two_all_boxes() {
        let tiles = tiles_of(
            r"
########
# $$   #
# $$@  #
# ....##
########
",
        );
        for &pos in &[
            Pos::new(1, 2),
            Pos::new(1, 3),
            Pos::new(2, 2),
            Pos::new(2, 3),
        ] {
            assert!(is_dead_after_push(&tiles, pos));
        }
    }

    #[test]
    fn open_floor_is_not_dead() {
        let tiles = tiles_of(
            r"
#######
#     #
#  $@.#
#     #
#######
",
        );
        assert!(!is_dead_after_push(&tiles, Pos::new(2, 3)));
    }

    #[test]
    fn wall_line_without_corner_passes() {
        // a known limitation: a box against a goalless wall is dead but the
        // local patterns cannot see it
        let tiles = tiles_of(
            r"
#######
#  $  #
# @  .#
#######
",
        );
        assert!(!is_dead_after_push(&tiles, Pos::new(1, 3)));
    }

    #[test]
    fn repeated_evaluation_is_stable() {
        let tiles = tiles_of(
            r"
#####
#$ @#
# . #
#####
",
        );
        assert!(is_dead_after_push(&tiles, Pos::new(1, 1)));
        assert!(is_dead_after_push(&tiles, Pos::new(1, 1)));
    }

    #[test]
    fn out_of_grid_neighbors_are_walls() {
        // box on the outer edge of a room with no surrounding wall row
        let tiles = tiles_of(
            r"
$..
@ $
",
        );
        assert!(is_dead_after_push(&tiles, Pos::new(0, 0)));
        assert!(is_dead_after_push(&tiles, Pos::new(1, 2)));
    }
}
