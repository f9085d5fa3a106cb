pub struct MarkdownLink;

impl MarkdownLink {
    pub const IMAGE: u8 = b'!';
    pub const LABEL_OPEN: u8 = b'[';
    pub const LABEL_CLOSE: u8 = b']';
    pub const TARGET_OPEN: u8 = b'(';
    pub const TARGET_CLOSE: u8 = b')';
}
