use std::sync::Arc;

use oberon_core::control::event::event_queue;
use oberon_core::control::input::InputTranslator;
use oberon_core::control::lifecycle::LifecycleController;
use oberon_core::control::render::{PRODUCT_LABEL, RenderLoop};
use oberon_core::cpu::AddressSpace;
use oberon_core::device::Framebuffer;
use oberon_machines::{
    Board, Engine, KeyQueue, Mmio, Sketchpad, ThreadedProcessor, VideoObserver,
};
use sdl2::event::Event;

use crate::config::Config;
use crate::error::FrontendError;
use crate::input::HostInput;
use crate::video::Video;

type Cpu = ThreadedProcessor<Sketchpad>;

pub fn run(config: &Config) -> Result<(), FrontendError> {
    let sdl_context = sdl2::init().map_err(FrontendError::Sdl)?;
    let sdl_video = sdl_context.video().map_err(FrontendError::Sdl)?;

    let (width, height) = (config.display.width, config.display.height);
    let mut video = Video::new(&sdl_video, PRODUCT_LABEL, width, height, config.scale)?;
    let mut event_pump = sdl_context.event_pump().map_err(FrontendError::Sdl)?;
    sdl_video.text_input().start();
    sdl_context.mouse().show_cursor(!Sketchpad::DRAWS_POINTER);

    let mmio = Arc::new(Mmio::new());
    let keyboard = Arc::new(KeyQueue::new());
    let address_space = AddressSpace::from_large_flag(config.large_address_space);
    let board = Arc::new(Board::new(
        address_space,
        width,
        height,
        Arc::clone(&mmio),
        Arc::clone(&keyboard),
    )?);
    let framebuffer = Arc::new(Framebuffer::new(width, height)?);
    let mut observer = VideoObserver::new(&board, Arc::clone(&framebuffer))?;

    let controller = LifecycleController::<Cpu>::new(Arc::clone(&board), address_space);
    let mut render = RenderLoop::new(framebuffer, Arc::clone(&mmio), controller.probe())
        .with_tint(config.tint());
    let mut translator = InputTranslator::new(controller, keyboard, mmio, width, height);
    let host = HostInput::new(config.scale);
    let (events, queue) = event_queue();

    log::info!(
        "{width}x{height} display, {} words of memory ({:?} address space)",
        board.words(),
        address_space
    );
    translator.lifecycle().start();

    'main: loop {
        // Capture: SDL events into the host event queue
        for event in event_pump.poll_iter() {
            if let Event::Quit { .. } = event {
                break 'main;
            }
            for host_event in host.translate(&event) {
                events.send(host_event)?;
            }
        }

        // Dispatch: keyboard queue, mouse registers, resets
        translator.drain(&queue);

        // Paint; frame pacing comes from VSync (set in Video::new)
        observer.refresh(&board);
        render.paint(&mut video);
    }

    log::info!("shutting down");
    translator.lifecycle().shutdown();
    Ok(())
}
