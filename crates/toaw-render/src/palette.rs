//! Unit colours by team id.
//!
//! The table is immutable. Ids without an entry are drawn with
//! [`GroupColor::FALLBACK`] so the same scenario always renders the same
//! image.

use image::Rgba;

/// Outer and inner square colours of a unit marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupColor {
    pub outer: Rgba<u8>,
    pub inner: Rgba<u8>,
}

impl GroupColor {
    /// Colour for ids missing from the table: magenta around black.
    pub const FALLBACK: Self = Self::new([255, 0, 255], [0, 0, 0]);

    pub const fn new(outer: [u8; 3], inner: [u8; 3]) -> Self {
        Self {
            outer: Rgba([outer[0], outer[1], outer[2], 255]),
            inner: Rgba([inner[0], inner[1], inner[2], 255]),
        }
    }
}

/// Sorted by id.
static GROUP_COLORS: [(u32, GroupColor); 81] = [
    (0, GroupColor::new([0, 107, 189], [222, 0, 41])),
    (5, GroupColor::new([165, 132, 66], [247, 247, 247])),
    (6, GroupColor::new([165, 132, 66], [0, 0, 255])),
    (7, GroupColor::new([165, 132, 66], [0, 132, 0])),
    (8, GroupColor::new([165, 132, 66], [0, 0, 107])),
    (9, GroupColor::new([165, 132, 66], [0, 0, 0])),
    (10, GroupColor::new([173, 173, 173], [239, 239, 239])),
    (11, GroupColor::new([173, 173, 173], [0, 0, 0])),
    (12, GroupColor::new([173, 173, 173], [231, 239, 247])),
    (13, GroupColor::new([173, 173, 173], [148, 165, 148])),
    (14, GroupColor::new([173, 173, 173], [140, 8, 0])),
    (15, GroupColor::new([24, 140, 24], [198, 214, 181])),
    (19, GroupColor::new([0, 132, 0], [0, 0, 255])),
    (20, GroupColor::new([128, 0, 0], [115, 99, 82])),
    (21, GroupColor::new([128, 0, 0], [0, 0, 0])),
    (22, GroupColor::new([128, 0, 0], [99, 0, 0])),
    (23, GroupColor::new([128, 0, 0], [99, 123, 66])),
    (24, GroupColor::new([128, 0, 0], [255, 0, 0])),
    (30, GroupColor::new([247, 247, 247], [123, 198, 255])),
    (31, GroupColor::new([247, 247, 247], [255, 255, 0])),
    (32, GroupColor::new([247, 247, 247], [255, 247, 0])),
    (33, GroupColor::new([247, 247, 247], [156, 189, 148])),
    (34, GroupColor::new([247, 247, 247], [189, 189, 189])),
    (35, GroupColor::new([239, 222, 0], [255, 247, 99])),
    (36, GroupColor::new([239, 222, 0], [165, 214, 148])),
    (37, GroupColor::new([239, 222, 0], [112, 194, 240])),
    (38, GroupColor::new([239, 222, 0], [206, 189, 156])),
    (39, GroupColor::new([239, 222, 0], [247, 247, 247])),
    (40, GroupColor::new([198, 181, 132], [239, 239, 65])),
    (41, GroupColor::new([198, 181, 132], [0, 0, 255])),
    (42, GroupColor::new([198, 181, 132], [123, 198, 255])),
    (43, GroupColor::new([198, 181, 132], [255, 0, 0])),
    (44, GroupColor::new([198, 181, 132], [255, 255, 0])),
    (45, GroupColor::new([148, 165, 66], [189, 189, 189])),
    (49, GroupColor::new([148, 165, 66], [247, 247, 247])),
    (50, GroupColor::new([132, 140, 66], [247, 239, 115])),
    (51, GroupColor::new([132, 140, 66], [255, 0, 0])),
    (52, GroupColor::new([132, 140, 66], [0, 0, 255])),
    (53, GroupColor::new([132, 140, 66], [123, 198, 255])),
    (54, GroupColor::new([132, 140, 66], [0, 0, 132])),
    (55, GroupColor::new([82, 156, 255], [189, 24, 24])),
    (56, GroupColor::new([82, 156, 255], [239, 239, 239])),
    (57, GroupColor::new([82, 156, 255], [33, 123, 214])),
    (58, GroupColor::new([82, 156, 255], [189, 222, 247])),
    (59, GroupColor::new([82, 156, 255], [8, 107, 181])),
    (60, GroupColor::new([189, 206, 189], [107, 107, 107])),
    (61, GroupColor::new([189, 206, 189], [247, 247, 247])),
    (62, GroupColor::new([189, 206, 189], [156, 173, 66])),
    (63, GroupColor::new([189, 206, 189], [255, 255, 156])),
    (64, GroupColor::new([189, 206, 189], [247, 189, 107])),
    (65, GroupColor::new([156, 123, 41], [165, 99, 24])),
    (66, GroupColor::new([156, 123, 41], [82, 132, 206])),
    (67, GroupColor::new([156, 123, 41], [33, 148, 123])),
    (68, GroupColor::new([156, 123, 41], [222, 214, 173])),
    (69, GroupColor::new([156, 123, 41], [206, 189, 148])),
    (70, GroupColor::new([148, 165, 148], [247, 247, 247])),
    (71, GroupColor::new([148, 165, 148], [222, 206, 173])),
    (72, GroupColor::new([148, 165, 148], [247, 239, 165])),
    (73, GroupColor::new([148, 165, 148], [8, 16, 8])),
    (74, GroupColor::new([148, 165, 148], [198, 231, 231])),
    (77, GroupColor::new([107, 181, 90], [231, 231, 123])),
    (90, GroupColor::new([198, 24, 24], [156, 16, 16])),
    (91, GroupColor::new([198, 24, 24], [231, 231, 231])),
    (92, GroupColor::new([198, 24, 24], [165, 132, 49])),
    (93, GroupColor::new([198, 24, 24], [222, 0, 41])),
    (94, GroupColor::new([198, 24, 24], [16, 16, 16])),
    (95, GroupColor::new([198, 181, 132], [148, 198, 140])),
    (96, GroupColor::new([198, 181, 132], [30, 128, 200])),
    (97, GroupColor::new([198, 181, 132], [198, 222, 239])),
    (98, GroupColor::new([198, 181, 132], [231, 222, 148])),
    (99, GroupColor::new([198, 181, 132], [239, 222, 165])),
    (100, GroupColor::new([0, 0, 0], [0, 0, 0])),
    (101, GroupColor::new([0, 0, 0], [222, 0, 41])),
    (102, GroupColor::new([0, 0, 0], [107, 90, 74])),
    (103, GroupColor::new([0, 0, 0], [90, 107, 90])),
    (104, GroupColor::new([0, 0, 0], [16, 107, 148])),
    (105, GroupColor::new([115, 115, 115], [148, 165, 148])),
    (106, GroupColor::new([115, 115, 115], [24, 24, 24])),
    (107, GroupColor::new([115, 115, 115], [148, 181, 66])),
    (108, GroupColor::new([115, 115, 115], [247, 247, 239])),
    (109, GroupColor::new([115, 115, 115], [231, 189, 123])),
];

/// The table entry for `team`, if any.
pub fn lookup(team: u32) -> Option<GroupColor> {
    GROUP_COLORS
        .binary_search_by_key(&team, |&(id, _)| id)
        .ok()
        .map(|index| GROUP_COLORS[index].1)
}

/// The colour for `team`, falling back to [`GroupColor::FALLBACK`].
pub fn group_color(team: u32) -> GroupColor {
    lookup(team).unwrap_or(GroupColor::FALLBACK)
}
