use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::core::command::{Command, Flow};
use crate::core::display::{DisplaySurface, PageView, Slot};
use crate::core::page_controller::PageController;
use crate::i18n::en::*;

/// Text rendering of each page, one line per grid cell.
pub struct ConsoleSurface<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    fn write_view(&mut self, view: &PageView) -> io::Result<()> {
        writeln!(self.out, "{}", batch_heading(view.page, view.total_pages))?;
        for (i, slot) in view.slots.iter().enumerate() {
            match slot {
                Slot::Image(thumb) => {
                    let (w, h) = dimension_labels(thumb.width, thumb.height);
                    writeln!(self.out, "  [{}] {}  {}  {}", i + 1, thumb.caption, w, h)?;
                }
                Slot::Failed { caption, message } => {
                    writeln!(self.out, "  [{}] {}  error: {}", i + 1, caption, message)?;
                }
                Slot::Empty => writeln!(self.out, "  [{}] -", i + 1)?,
            }
        }
        self.out.flush()
    }

    fn write_metadata(&mut self, path: &Path, lines: &[String]) -> io::Result<()> {
        writeln!(self.out, "{}", path.display())?;
        for line in lines {
            writeln!(self.out, "  {}", line)?;
        }
        Ok(())
    }
}

impl<W: Write> DisplaySurface for ConsoleSurface<W> {
    fn draw(&mut self, view: PageView) {
        if let Err(e) = self.write_view(&view) {
            tracing::warn!(error = %e, "failed to write page to console");
        }
    }

    fn show_metadata(&mut self, path: &Path, lines: &[String]) {
        if let Err(e) = self.write_metadata(path, lines) {
            tracing::warn!(error = %e, "failed to write metadata to console");
        }
    }
}

/// Prompt for `n`/`b`/`q` until the user quits or input ends.
pub fn run_prompt<W: Write, R: BufRead>(
    controller: &mut PageController<ConsoleSurface<W>>,
    mut input: R,
) -> io::Result<()> {
    let mut line = String::new();
    loop {
        {
            let out = controller.surface_mut().writer_mut();
            write!(out, "{}", TEXT_PROMPT)?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let Some(command) = Command::parse(&line) else {
            continue;
        };
        tracing::debug!(?command, "console command");

        if controller.apply(command) == Flow::Quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::display::Thumbnail;
    use crate::core::file_manager::FileList;
    use crate::core::image_loader_factory::ImageLoaderFactory;
    use image::RgbaImage;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn output(surface: &ConsoleSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.writer().clone()).unwrap()
    }

    #[test]
    fn test_draw_lists_every_slot() {
        let mut surface = ConsoleSurface::new(Vec::new());
        surface.draw(PageView {
            page: 2,
            total_pages: 3,
            slots: vec![
                Slot::Image(Thumbnail {
                    caption: "chest.dcm".into(),
                    width: 512,
                    height: 256,
                    image: RgbaImage::new(1, 1),
                }),
                Slot::Failed {
                    caption: "notes.txt".into(),
                    message: "unsupported".into(),
                },
                Slot::Empty,
            ],
        });

        let text = output(&surface);
        assert!(text.starts_with("Batch 2 of 3\n"));
        assert!(text.contains("[1] chest.dcm  width: 512  height: 256"));
        assert!(text.contains("[2] notes.txt  error: unsupported"));
        assert!(text.contains("[3] -"));
    }

    #[test]
    fn test_prompt_drives_controller_until_quit() {
        // No decoders registered, so every slot fails without touching disk.
        let files = FileList::new(
            ["a.png", "b.png", "c.png"].iter().map(PathBuf::from).collect(),
        );
        let mut controller = PageController::new(
            files,
            1,
            ImageLoaderFactory::empty(),
            ConsoleSurface::new(Vec::new()),
        );

        let input = Cursor::new("n\nx\nN\nn\nb\nq\nn\n");
        run_prompt(&mut controller, input).unwrap();

        assert_eq!(controller.current_index(), 2);
        let text = output(controller.surface());
        assert_eq!(text.matches("Batch 1 of 3").count(), 1);
        assert_eq!(text.matches("Batch 2 of 3").count(), 2);
        assert_eq!(text.matches("Batch 3 of 3").count(), 1);
    }

    #[test]
    fn test_prompt_ends_on_eof() {
        let files = FileList::new(vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);
        let mut controller = PageController::new(
            files,
            1,
            ImageLoaderFactory::empty(),
            ConsoleSurface::new(Vec::new()),
        );

        run_prompt(&mut controller, Cursor::new("n\n")).unwrap();
        assert_eq!(controller.current_index(), 2);
    }
}
