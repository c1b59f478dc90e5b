use tokio::sync::mpsc;

use crate::log;
use super::game_state::SnakeGame;
use super::renderer::Renderer;
use super::scheduler::IntervalScheduler;
use super::types::{GameStatus, InputEvent, StepOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub status: GameStatus,
    pub ticks: u64,
}

/// Drives `game` until the input channel closes.
///
/// Ticks from the game's timer and input events are handled one at a time
/// on this task; input only queues a direction or changes the status, the
/// tick channel is the only thing that advances the snake. Ticks left over
/// from a cancelled timer are dropped.
pub async fn run_session<R: Renderer>(
    mut game: SnakeGame<R, IntervalScheduler>,
    mut tick_rx: mpsc::UnboundedReceiver<u64>,
    mut input_rx: mpsc::UnboundedReceiver<InputEvent>,
) -> SessionSummary {
    let mut ticks = 0u64;

    loop {
        tokio::select! {
            Some(generation) = tick_rx.recv() => {
                if !game.scheduler().is_current(generation) {
                    continue;
                }
                ticks += 1;
                match game.step() {
                    StepOutcome::Won => log!("Won after {} ticks", ticks),
                    StepOutcome::Collided => log!("Lost after {} ticks", ticks),
                    _ => {}
                }
            }
            event = input_rx.recv() => {
                match event {
                    Some(event) => game.handle_input(event),
                    None => break,
                }
            }
        }
    }

    game.stop();

    SessionSummary {
        score: game.score(),
        status: game.status(),
        ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;
    use crate::games::snake::renderer::RecordingRenderer;
    use crate::games::snake::scheduler::TickScheduler;
    use crate::games::snake::settings::{SnakeConfig, SnakeConfigOverrides};
    use crate::games::snake::renderer::GameSnapshot;
    use crate::games::snake::types::{Direction, Point};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn create_session() -> (
        SnakeGame<RecordingRenderer, IntervalScheduler>,
        mpsc::UnboundedReceiver<u64>,
    ) {
        let (scheduler, tick_rx) = IntervalScheduler::new();
        let config = SnakeConfig::init(&SnakeConfigOverrides {
            speed: Some(10),
            ..Default::default()
        });
        let game = SnakeGame::new(config, RecordingRenderer::new(), scheduler, SessionRng::new(99))
            .unwrap();
        (game, tick_rx)
    }

    #[tokio::test]
    async fn test_session_ends_when_input_closes() {
        let (game, tick_rx) = create_session();
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        drop(input_tx);

        let summary = run_session(game, tick_rx, input_rx).await;

        assert_eq!(summary.status, GameStatus::Stopped);
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.score, 0);
    }

    #[tokio::test]
    async fn test_session_ticks_while_playing() {
        let (game, tick_rx) = create_session();
        let (input_tx, input_rx) = mpsc::unbounded_channel();

        let session = tokio::spawn(run_session(game, tick_rx, input_rx));

        input_tx.send(InputEvent::PlayToggleRequested).unwrap();
        input_tx
            .send(InputEvent::DirectionRequested(Direction::Left))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(350)).await;
        input_tx.send(InputEvent::PlayToggleRequested).unwrap();
        drop(input_tx);

        let summary = tokio::time::timeout(Duration::from_secs(5), session)
            .await
            .unwrap()
            .unwrap();

        assert!(summary.ticks >= 1, "ticks: {}", summary.ticks);
        assert_ne!(summary.status, GameStatus::Playing);
    }

    #[tokio::test]
    async fn test_stopped_session_has_no_active_timer() {
        let (mut game, _tick_rx) = create_session();

        game.play();
        assert!(game.scheduler().is_active());
        game.stop();
        game.stop();

        assert!(!game.scheduler().is_active());
    }

    /// Frames stay readable after the session has consumed the game.
    #[derive(Clone, Default)]
    struct SharedRenderer {
        frames: Arc<Mutex<Vec<GameSnapshot>>>,
    }

    impl Renderer for SharedRenderer {
        fn render(&mut self, snapshot: &GameSnapshot) {
            self.frames.lock().unwrap().push(snapshot.clone());
        }
    }

    /// A game restarted once: its first timer (generation 1) is cancelled and
    /// generation 2 is current.
    fn create_restarted_session() -> (
        SnakeGame<SharedRenderer, IntervalScheduler>,
        mpsc::UnboundedReceiver<u64>,
        SharedRenderer,
    ) {
        let (scheduler, timer_rx) = IntervalScheduler::new();
        let renderer = SharedRenderer::default();
        let mut game = SnakeGame::new(
            SnakeConfig::default(),
            renderer.clone(),
            scheduler,
            SessionRng::new(99),
        )
        .unwrap();

        game.play();
        game.stop();
        game.play();
        assert!(!game.scheduler().is_current(1));
        assert!(game.scheduler().is_current(2));

        (game, timer_rx, renderer)
    }

    async fn run_with_ticks(
        game: SnakeGame<SharedRenderer, IntervalScheduler>,
        generations: &[u64],
    ) -> SessionSummary {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        for generation in generations {
            tick_tx.send(*generation).unwrap();
        }

        let session = tokio::spawn(run_session(game, tick_rx, input_rx));
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(input_tx);

        tokio::time::timeout(Duration::from_secs(5), session)
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_tick_from_cancelled_timer_is_dropped() {
        let (game, _timer_rx, renderer) = create_restarted_session();
        let frames_before = renderer.frames.lock().unwrap().len();

        let summary = run_with_ticks(game, &[1]).await;

        let frames = renderer.frames.lock().unwrap();
        assert_eq!(summary.ticks, 0);
        assert_eq!(frames.len(), frames_before);
        assert_eq!(frames.last().unwrap().body[0], Point::new(10, 10));
    }

    #[tokio::test]
    async fn test_only_current_generation_moves_the_snake() {
        let (game, _timer_rx, renderer) = create_restarted_session();

        let summary = run_with_ticks(game, &[1, 2, 1]).await;

        let frames = renderer.frames.lock().unwrap();
        assert_eq!(summary.ticks, 1);
        assert_eq!(frames.last().unwrap().body[0], Point::new(10, 9));
    }
}
