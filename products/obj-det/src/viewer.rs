use {
    crate::{FrameSink, ViewerError},
    base::Vec2,
    image::Image,
    minifb::{Key, Window, WindowOptions},
};

/// Native window showing the latest frame.
///
/// The window opens on the first frame and is reopened whenever the frame
/// size changes.
pub struct Viewer {
    title: String,
    window: Option<Window>,
    size: Vec2<usize>,
}

impl Viewer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            window: None,
            size: Vec2::zero(),
        }
    }

    fn window_for(&mut self, size: Vec2<usize>) -> Result<&mut Window, ViewerError> {
        if self.window.is_none() || self.size != size {
            if self.window.is_some() {
                log::info!("frame size changed from {} to {}, reopening window", self.size, size);
            }
            // drop the old window before opening a new one
            self.window = None;
            let mut window = Window::new(&self.title, size.x, size.y, WindowOptions::default())
                .map_err(|e| ViewerError::Window(e.to_string()))?;
            window.set_target_fps(0);
            self.window = Some(window);
            self.size = size;
        }
        self.window
            .as_mut()
            .ok_or_else(|| ViewerError::Window("window missing".to_string()))
    }
}

impl FrameSink for Viewer {
    fn show(&mut self, image: &Image) -> Result<(), ViewerError> {
        let buffer = image.to_u32();
        let window = self.window_for(image.size)?;
        window.update_with_buffer(&buffer, image.width(), image.height())?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        match &self.window {
            Some(window) => window.is_open() && !window.is_key_down(Key::Escape),
            None => true,
        }
    }

    fn poll(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.update();
        }
    }
}

/// Sink for runs without a window server. Frames are only counted.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    shown: u64,
    last_size: Option<Vec2<usize>>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> u64 {
        self.shown
    }

    pub fn last_size(&self) -> Option<Vec2<usize>> {
        self.last_size
    }
}

impl FrameSink for HeadlessDisplay {
    fn show(&mut self, image: &Image) -> Result<(), ViewerError> {
        self.shown += 1;
        self.last_size = Some(image.size);
        if self.shown == 1 {
            log::info!("headless: first frame {}", image.size);
        }
        Ok(())
    }
}
