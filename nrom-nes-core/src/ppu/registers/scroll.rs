use crate::Byte;

/// Raw scroll position as last written through $2005.
/// The renderer draws a whole frame from these two bytes; the loopy `t` and
/// fine X copies kept by the address register only matter for mid-frame
/// $2006 tricks, which a once-per-frame renderer cannot show.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRegister {
    pub scroll_x: Byte,
    pub scroll_y: Byte,
}
