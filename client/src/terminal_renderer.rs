use std::io::{self, Write};

use common::games::snake::{GameSnapshot, Point, Renderer};
use common::{log, GameStatus};
use crossterm::{
    cursor,
    style::Print,
    terminal::{self, ClearType},
    QueueableCommand,
};

pub struct TerminalRenderer {
    cols: usize,
    rows: usize,
    status_line: String,
    buf: Vec<u8>,
    active: bool,
}

impl TerminalRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            status_line: status_line(GameStatus::Stopped, 0),
            buf: Vec::with_capacity(4 * 1024),
            active: false,
        }
    }

    /// Switches the terminal to raw mode on the alternate screen. Dropping
    /// the renderer restores it.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.buf.clear();
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()
    }

    pub fn draw(&self, snapshot: &GameSnapshot) -> String {
        let mut cells = vec![vec!['.'; self.cols]; self.rows];
        let mut put = |point: Point, ch: char| {
            if let Some(cell) = cells.get_mut(point.y).and_then(|row| row.get_mut(point.x)) {
                *cell = ch;
            }
        };

        put(snapshot.food, '*');
        for segment in snapshot.body.iter().skip(1) {
            put(*segment, 'o');
        }
        if let Some(head) = snapshot.body.first() {
            put(*head, '@');
        }

        let mut frame = String::with_capacity((self.cols * 2 + 1) * self.rows + 64);
        for row in cells {
            let line: Vec<String> = row.iter().map(char::to_string).collect();
            frame.push_str(&line.join(" "));
            frame.push('\n');
        }
        frame.push_str(&format!("Score: {}\n", snapshot.score));
        frame.push_str(&self.status_line);
        frame.push('\n');
        frame
    }

    // Raw mode does not return the carriage on '\n', so every line is placed
    // with an explicit cursor move.
    fn queue_frame(&mut self, snapshot: &GameSnapshot) -> io::Result<()> {
        let frame = self.draw(snapshot);
        self.buf.queue(terminal::Clear(ClearType::All))?;
        for (y, line) in frame.lines().enumerate() {
            self.buf.queue(cursor::MoveTo(0, y as u16))?;
            self.buf.queue(Print(line))?;
        }
        Ok(())
    }

    fn queue_status_line(&mut self) -> io::Result<()> {
        // grid rows, then the score line, then the status line
        let y = (self.rows + 1) as u16;
        self.buf.queue(cursor::MoveTo(0, y))?;
        self.buf.queue(terminal::Clear(ClearType::CurrentLine))?;
        self.buf.queue(Print(&self.status_line))?;
        Ok(())
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&self.buf)?;
        stdout.flush()?;
        self.buf.clear();
        Ok(())
    }
}

fn status_line(status: GameStatus, score: u32) -> String {
    match status {
        GameStatus::Stopped => "[p] play  [r] reset  [q] quit".to_string(),
        GameStatus::Playing => "[w/a/s/d] turn  [p] stop  [r] reset  [q] quit".to_string(),
        GameStatus::Finished => format!("Game over, final score {}.  [r] new game  [q] quit", score),
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: &GameSnapshot) {
        self.buf.clear();
        let result = self.queue_frame(snapshot).and_then(|_| self.flush_buf());
        // a closed stdout only loses the picture, the game keeps running
        if let Err(e) = result {
            log!("Failed to draw frame: {}", e);
        }
    }

    fn status_changed(&mut self, status: GameStatus, score: u32) {
        self.status_line = status_line(status, score);
        self.buf.clear();
        let result = self.queue_status_line().and_then(|_| self.flush_buf());
        if let Err(e) = result {
            log!("Failed to draw status line: {}", e);
        }
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            log!("Failed to restore terminal: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_by_two() -> GameSnapshot {
        GameSnapshot {
            body: vec![Point::new(1, 0), Point::new(0, 0)],
            food: Point::new(2, 1),
            score: 4,
            status: GameStatus::Playing,
        }
    }

    #[test]
    fn test_draws_head_body_and_food() {
        let renderer = TerminalRenderer::new(3, 2);

        let frame = renderer.draw(&three_by_two());
        let lines: Vec<&str> = frame.lines().collect();

        assert_eq!(lines[0], "o @ .");
        assert_eq!(lines[1], ". . *");
        assert_eq!(lines[2], "Score: 4");
    }

    #[test]
    fn test_draw_is_idempotent() {
        let renderer = TerminalRenderer::new(10, 10);
        let snapshot = GameSnapshot {
            body: vec![Point::new(5, 5)],
            food: Point::new(1, 1),
            score: 0,
            status: GameStatus::Stopped,
        };

        assert_eq!(renderer.draw(&snapshot), renderer.draw(&snapshot));
    }

    #[test]
    fn test_frame_places_each_row_with_cursor_moves() {
        let mut renderer = TerminalRenderer::new(3, 2);

        renderer.queue_frame(&three_by_two()).unwrap();
        let out = String::from_utf8(renderer.buf.clone()).unwrap();

        assert!(out.starts_with("\x1b[2J"));
        assert!(out.contains("\x1b[1;1Ho @ ."));
        assert!(out.contains("\x1b[2;1H. . *"));
        assert!(out.contains("\x1b[3;1HScore: 4"));
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_status_line_is_drawn_below_score() {
        let mut renderer = TerminalRenderer::new(3, 2);
        renderer.status_line = status_line(GameStatus::Finished, 7);

        renderer.queue_status_line().unwrap();
        let out = String::from_utf8(renderer.buf.clone()).unwrap();

        assert!(out.starts_with("\x1b[4;1H"));
        assert!(out.ends_with("Game over, final score 7.  [r] new game  [q] quit"));
    }

    #[test]
    fn test_exit_without_enter_leaves_terminal_alone() {
        let mut renderer = TerminalRenderer::new(3, 2);

        assert!(renderer.exit().is_ok());
        assert!(renderer.buf.is_empty());
    }
}
