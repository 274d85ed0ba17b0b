use std::sync::Arc;

use oberon_core::control::lifecycle::{LifecycleController, ResetKind};
use oberon_core::control::render::{RenderLoop, Surface, Tint};
use oberon_core::cpu::AddressSpace;
use oberon_core::device::Framebuffer;
mod common;
use common::{FakeProcessor, RecordingIo, TestMemory};

#[derive(Default)]
struct RecordingSurface {
    titles: Vec<String>,
    frames: Vec<Vec<u8>>,
}

impl Surface for RecordingSurface {
    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }

    fn present(&mut self, rgb: &[u8]) {
        self.frames.push(rgb.to_vec());
    }
}

fn setup() -> (
    LifecycleController<FakeProcessor>,
    Arc<Framebuffer>,
    Arc<RecordingIo>,
    RenderLoop<RecordingIo>,
) {
    let controller =
        LifecycleController::new(Arc::new(TestMemory::default()), AddressSpace::Standard);
    controller.start();
    let fb = Arc::new(Framebuffer::new(4, 2).unwrap());
    let io = Arc::new(RecordingIo::default());
    let render = RenderLoop::new(Arc::clone(&fb), Arc::clone(&io), controller.probe());
    (controller, fb, io, render)
}

#[test]
fn test_running_frame_is_untouched_framebuffer() {
    let (_controller, fb, _io, mut render) = setup();
    fb.set_pixel(0, 0, 0x102030);
    fb.set_pixel(3, 1, 0xFFFFFF);

    let mut surface = RecordingSurface::default();
    let report = render.paint(&mut surface);
    assert!(!report.halted);

    let frame = &surface.frames[0];
    assert_eq!(frame.len(), 4 * 2 * 3);
    assert_eq!(&frame[0..3], &[0x10, 0x20, 0x30]);
    assert_eq!(&frame[21..24], &[0xFF, 0xFF, 0xFF]);
    assert_eq!(&frame[3..6], &[0, 0, 0]);
}

#[test]
fn test_halted_frame_has_uniform_tint() {
    let (controller, _fb, _io, mut render) = setup();
    controller.active().crash();

    let mut surface = RecordingSurface::default();
    assert!(render.paint(&mut surface).halted);

    let frame = &surface.frames[0];
    // Black framebuffer: every pixel becomes the tint blended over black.
    for px in frame.chunks_exact(3) {
        assert_eq!(px, &[100, 0, 0]);
    }
}

#[test]
fn test_overlay_cleared_after_warm_reset() {
    let (mut controller, fb, _io, mut render) = setup();
    fb.set_pixel(1, 0, 0x00FF00);
    controller.active().crash();

    let mut surface = RecordingSurface::default();
    assert!(render.paint(&mut surface).halted);

    let report = controller.reset(ResetKind::Warm);
    assert!(report.registers_copied);
    assert!(!render.paint(&mut surface).halted);
    assert_eq!(&surface.frames[1][3..6], &[0, 0xFF, 0]);
    assert_ne!(surface.frames[0], surface.frames[1]);
}

#[test]
fn test_title_tracks_indicator_status() {
    let (_controller, _fb, io, mut render) = setup();
    let mut surface = RecordingSurface::default();
    render.paint(&mut surface);
    *io.status.lock().unwrap() = "*------*".to_string();
    render.paint(&mut surface);
    assert_eq!(
        surface.titles,
        vec![
            "-------- - Oberon Emulator".to_string(),
            "*------* - Oberon Emulator".to_string(),
        ]
    );
}

#[test]
fn test_custom_tint() {
    let (controller, fb, _io, render) = setup();
    let mut render = render.with_tint(Tint {
        r: 0,
        g: 0,
        b: 255,
        alpha: 255,
    });
    fb.set_pixel(0, 0, 0xFFFFFF);
    controller.active().crash();

    let mut surface = RecordingSurface::default();
    render.paint(&mut surface);
    assert_eq!(&surface.frames[0][0..3], &[0, 0, 255]);
}
