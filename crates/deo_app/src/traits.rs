use crate::context::FrameContext;

/// The trait every deolib game or demo implements.
///
/// Only `update` is required.  Returning `Err` from a callback does not stop
/// the loop: the runner logs the error, hands it to the error hook (see
/// [`App::on_error`](crate::App::on_error)) and carries on with the next
/// frame.  Panics are contained the same way on targets that unwind.
///
/// ```rust,ignore
/// struct Pong { paddle_y: f32 }
///
/// impl DeoApp for Pong {
///     fn update(&mut self, ctx: &mut FrameContext) -> anyhow::Result<()> {
///         if ctx.input().is_key_down("ArrowUp") {
///             self.paddle_y -= 300.0 * ctx.time.delta;
///         }
///         Ok(())
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait DeoApp {
    /// Called once when the runner starts, before the first frame.
    fn setup(&mut self, ctx: &mut FrameContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called exactly once per scheduled frame.
    fn update(&mut self, ctx: &mut FrameContext) -> anyhow::Result<()>;

    /// The page was hidden (or lost focus with `pause_on_blur`); no frames
    /// will run until `on_resume`.
    fn on_pause(&mut self) {}

    fn on_resume(&mut self) {}
}

/// Adapter turning a closure into a [`DeoApp`].  Built with [`from_fn`].
pub struct FnApp<F>(F);

/// Use a plain per-frame closure as the app.
///
/// ```rust,ignore
/// let mut frames = 0;
/// App::new(from_fn(move |_ctx| { frames += 1; Ok(()) }));
/// ```
pub fn from_fn<F>(f: F) -> FnApp<F>
where
    F: FnMut(&mut FrameContext) -> anyhow::Result<()>,
{
    FnApp(f)
}

impl<F> DeoApp for FnApp<F>
where
    F: FnMut(&mut FrameContext) -> anyhow::Result<()>,
{
    fn update(&mut self, ctx: &mut FrameContext) -> anyhow::Result<()> {
        (self.0)(ctx)
    }
}
