pub const BTN_PREV: &str = "Previous";
pub const BTN_NEXT: &str = "Next";
pub const BTN_QUIT: &str = "Quit";

pub const TEXT_NO_IMAGES: &str = "No images to display";
pub const TEXT_PROMPT: &str = "\"n\" for next batch; \"b\" for previous; \"q\" to quit->";
pub const TEXT_KEYS: &str = "N / → next · B / ← previous · Q quit";
pub const TEXT_EMPTY_SLOT: &str = "";

pub fn batch_heading(page: usize, total: usize) -> String {
    format!("Batch {} of {}", page, total)
}

pub fn dimension_labels(width: u32, height: u32) -> (String, String) {
    (format!("width: {}", width), format!("height: {}", height))
}
