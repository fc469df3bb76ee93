use {
    crate::{
        Detect, FrameHandler, FrameSink, HeadlessDisplay, NodeConfig, Viewer, constants,
    },
    futures_util::{Stream, StreamExt},
    inference::{ModelSource, ObjectDetector},
    ros::{Context, ImageMsg, ImageSubscriber, RosError},
    std::{error::Error, future::Future, time::Duration},
};

/// Why the node stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    Interrupt,
    WindowClosed,
    StreamEnded,
    SpinnerStopped,
}

/// Drive `handler` with `frames` until `interrupt` resolves, the display is
/// closed, the stream ends or `spinner` returns.
///
/// Frames are handled one at a time on the calling task; read errors are
/// logged and skipped.
pub async fn run_loop<D, S>(
    handler: &mut FrameHandler<D, S>,
    frames: impl Stream<Item = Result<ImageMsg, RosError>>,
    spinner: impl Future<Output = Result<(), RosError>>,
    interrupt: impl Future<Output = ()>,
) -> Result<Shutdown, RosError>
where
    D: Detect,
    S: FrameSink,
{
    tokio::pin!(frames, spinner, interrupt);
    let mut ticker = tokio::time::interval(Duration::from_millis(constants::WINDOW_POLL_MS));

    loop {
        tokio::select! {
            _ = &mut interrupt => return Ok(Shutdown::Interrupt),
            result = &mut spinner => {
                result?;
                return Ok(Shutdown::SpinnerStopped);
            }
            frame = frames.next() => match frame {
                Some(Ok(msg)) => {
                    handler.handle(&msg);
                }
                Some(Err(err)) => log::warn!("Failed to read frame: {}", err),
                None => return Ok(Shutdown::StreamEnded),
            },
            _ = ticker.tick() => handler.display_mut().poll(),
        }

        if !handler.display().is_open() {
            return Ok(Shutdown::WindowClosed);
        }
    }
}

/// Run the node until shutdown.
pub async fn run(config: NodeConfig) -> Result<Shutdown, Box<dyn Error>> {
    log::info!("Initializing YOLO ZED node");

    let detector = ObjectDetector::load(
        ModelSource::File(config.model_path.clone()),
        config.device.clone(),
        config.detector_config(),
    )?;
    log::info!(
        "Loaded {} model from: {}",
        config.device,
        config.model_path.display()
    );

    let display: Box<dyn FrameSink> = if config.headless {
        Box::new(HeadlessDisplay::new())
    } else {
        Box::new(Viewer::new(constants::WINDOW_TITLE))
    };
    let mut handler = FrameHandler::new(detector, display);

    let context = Context::new().map_err(|e| RosError::Create(format!("{e:?}")))?;
    let mut subscriber = ImageSubscriber::new(
        &context,
        constants::NODE_NAME,
        &config.topic,
        constants::QOS_DEPTH,
    )?;
    log::info!("Subscribed to {}", subscriber.topic());

    let spinner = subscriber.spin()?;
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for interrupt: {}", err);
            std::future::pending::<()>().await;
        }
    };
    let result = run_loop(&mut handler, subscriber.frames(), spinner, interrupt).await;

    log::info!("Shutting down YOLO node...");
    log::info!("{} frames shown", handler.frames());

    // node first, then the window, then the model session
    drop(subscriber);
    drop(context);
    let (detector, display) = handler.into_parts();
    drop(display);
    drop(detector);

    Ok(result?)
}
