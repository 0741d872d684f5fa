use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use common::games::SessionRng;
use common::games::tictactoe::{
    CELL_COUNT, Difficulty, PlayerSlot, RoundOutcome, SearchLimits, SymbolPair,
    TicTacToeGameState, winning_line,
};
use common::session::{
    PlayerNames, Scoreboard, TurnTimer, export_csv_to_path, render_board_snapshot,
};
use common::{log, log_debug};

use crate::config::{Config, GameMode};
use crate::render::{describe_line, render_board};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Place(usize),
    NewRound,
    Stats,
    Export(Option<PathBuf>),
    Quit,
}

/// Cells are entered 1-9; the returned index is 0-8.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let head = parts.next().unwrap_or_default().to_ascii_lowercase();
    let argument = parts.next().map(str::trim).filter(|s| !s.is_empty());

    match head.as_str() {
        "n" | "new" => Ok(Command::NewRound),
        "s" | "stats" => Ok(Command::Stats),
        "e" | "export" => Ok(Command::Export(argument.map(PathBuf::from))),
        "q" | "quit" => Ok(Command::Quit),
        "" => Err("Enter a cell number 1-9, or n, s, e, q".to_string()),
        other => match other.parse::<usize>() {
            Ok(cell) if (1..=CELL_COUNT).contains(&cell) => Ok(Command::Place(cell - 1)),
            _ => Err(format!("'{}' is not a cell number 1-9 or a command", other)),
        },
    }
}

#[derive(Debug, Clone)]
pub struct GameSettings {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub names: PlayerNames,
    pub symbols: SymbolPair,
    pub limits: SearchLimits,
    pub time_limit: Duration,
    pub export_path: PathBuf,
    pub recent_count: usize,
}

impl From<&Config> for GameSettings {
    fn from(config: &Config) -> Self {
        Self {
            mode: config.mode,
            difficulty: config.difficulty,
            names: config.player_names(),
            symbols: config.symbols.clone(),
            limits: config.search.limits(),
            time_limit: config.time_limit(),
            export_path: PathBuf::from(&config.history.export_path),
            recent_count: config.history.recent_count,
        }
    }
}

pub struct TerminalGame<R, W> {
    input: R,
    output: W,
    settings: GameSettings,
    state: TicTacToeGameState,
    scoreboard: Scoreboard,
    rng: SessionRng,
    timer: TurnTimer,
    clock_offset: Duration,
}

impl<R: BufRead, W: Write> TerminalGame<R, W> {
    pub fn new(input: R, output: W, settings: GameSettings, rng: SessionRng) -> Self {
        let timer = TurnTimer::start(settings.time_limit);
        Self {
            input,
            output,
            settings,
            state: TicTacToeGameState::new(),
            scoreboard: Scoreboard::new(),
            rng,
            timer,
            clock_offset: Duration::ZERO,
        }
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    #[cfg(test)]
    pub fn state(&self) -> &TicTacToeGameState {
        &self.state
    }

    pub fn run(&mut self) -> io::Result<()> {
        let opponent = match self.settings.mode {
            GameMode::SinglePlayer => format!("{} difficulty", self.settings.difficulty),
            GameMode::Multiplayer => "local multiplayer".to_string(),
        };
        writeln!(
            self.output,
            "Tic-Tac-Toe: {} {} vs {} {} ({}, {}s per move)",
            self.settings.names.player1,
            self.settings.symbols.player1,
            self.settings.names.player2,
            self.settings.symbols.player2,
            opponent,
            self.settings.time_limit.as_secs()
        )?;

        loop {
            if !self.state.is_over() && self.is_bot_turn() {
                self.play_bot_turn()?;
                continue;
            }

            self.prompt()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(self.output, "{}", message)?;
                    continue;
                }
            };

            match command {
                Command::Quit => break,
                Command::NewRound => self.new_round()?,
                Command::Stats => self.print_stats()?,
                Command::Export(path) => self.export(path)?,
                Command::Place(index) => self.play_human_turn(index)?,
            }
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    fn is_bot_turn(&self) -> bool {
        self.settings.mode == GameMode::SinglePlayer
            && self.state.current_player() == PlayerSlot::Player2
    }

    fn now(&self) -> Instant {
        Instant::now() + self.clock_offset
    }

    fn restart_timer(&mut self) {
        self.timer = TurnTimer::started_at(self.now(), self.settings.time_limit);
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn prompt(&mut self) -> io::Result<()> {
        if self.state.is_over() {
            writeln!(self.output, "Round over: [n]ew round, [s]tats, [e]xport, [q]uit")?;
        } else {
            let player = self.state.current_player();
            let remaining = self.timer.remaining_at(self.now());
            write!(
                self.output,
                "\n{}{} ({}), your move [1-9], {}s left: ",
                render_board(self.state.board(), &self.settings.symbols),
                self.settings.names.for_player(player),
                self.settings.symbols.for_player(player),
                remaining.as_secs()
            )?;
        }
        self.output.flush()
    }

    fn play_bot_turn(&mut self) -> io::Result<()> {
        let index = self
            .state
            .bot_move(self.settings.difficulty, &self.settings.limits, &mut self.rng)
            .map_err(io::Error::other)?;
        log_debug!("Bot ({}) played cell {}", self.settings.difficulty, index);

        writeln!(
            self.output,
            "{} plays {}",
            self.settings.names.player2,
            index + 1
        )?;

        if self.state.is_over() {
            self.finish_round()?;
        }
        self.restart_timer();
        Ok(())
    }

    fn play_human_turn(&mut self, index: usize) -> io::Result<()> {
        if self.state.is_over() {
            writeln!(self.output, "The round is over, press n for a new round")?;
            return Ok(());
        }

        let player = self.state.current_player();
        if self.timer.is_expired_at(self.now()) {
            self.state.forfeit_turn().map_err(io::Error::other)?;
            let name = self.settings.names.for_player(player);
            writeln!(self.output, "⏰ {} ran out of time! Turn forfeited.", name)?;
            log!("{} forfeited a turn after {}s", name, self.settings.time_limit.as_secs());
            self.restart_timer();
            return Ok(());
        }

        match self.state.place_mark(player, index) {
            Ok(()) => {
                if self.state.is_over() {
                    self.finish_round()?;
                }
                self.restart_timer();
            }
            Err(message) => writeln!(self.output, "{}", message)?,
        }
        Ok(())
    }

    fn finish_round(&mut self) -> io::Result<()> {
        let Some(outcome) = self.state.outcome() else {
            return Ok(());
        };
        let board = *self.state.board();

        writeln!(self.output, "\n{}", render_board(&board, &self.settings.symbols))?;
        match outcome {
            RoundOutcome::Winner(player) => {
                let line = winning_line(&board)
                    .map(|line| format!(" ({})", describe_line(&line)))
                    .unwrap_or_default();
                writeln!(
                    self.output,
                    "🎉 {} wins!{}",
                    self.settings.names.for_player(player),
                    line
                )?;
            }
            RoundOutcome::Draw => writeln!(self.output, "🤝 It's a draw!")?,
        }

        let entry = self
            .scoreboard
            .record_now(outcome, &self.settings.names, board);
        log!("Round finished at {}: {}", entry.timestamp, entry.winner);
        Ok(())
    }

    fn new_round(&mut self) -> io::Result<()> {
        self.state.reset();
        self.restart_timer();
        writeln!(self.output, "🔄 New round")
    }

    fn print_stats(&mut self) -> io::Result<()> {
        let names = &self.settings.names;
        let scores = self.scoreboard.scores();
        let streaks = self.scoreboard.streaks();

        writeln!(self.output, "🏆 Scores")?;
        writeln!(self.output, "{}: {}", names.player1, scores.player1)?;
        writeln!(self.output, "{}: {}", names.player2, scores.player2)?;
        writeln!(self.output, "Draws: {}", scores.draws)?;

        writeln!(self.output, "🔥 Win Streaks")?;
        writeln!(self.output, "{}: {}", names.player1, streaks.player1)?;
        writeln!(self.output, "{}: {}", names.player2, streaks.player2)?;

        if !self.scoreboard.history().is_empty() {
            writeln!(self.output, "📜 Game History")?;
            for entry in self.scoreboard.recent(self.settings.recent_count) {
                writeln!(self.output, "🕒 {} - {}", entry.timestamp, entry.winner)?;
                write!(
                    self.output,
                    "{}",
                    render_board_snapshot(&entry.board, &self.settings.symbols)
                )?;
            }
        }
        Ok(())
    }

    fn export(&mut self, path: Option<PathBuf>) -> io::Result<()> {
        if self.scoreboard.history().is_empty() {
            return writeln!(self.output, "No rounds to export yet");
        }

        let path = path.unwrap_or_else(|| self.settings.export_path.clone());
        match export_csv_to_path(self.scoreboard.history(), &path) {
            Ok(()) => {
                log!("Exported {} rounds to {}", self.scoreboard.history().len(), path.display());
                writeln!(self.output, "📥 History written to {}", path.display())
            }
            Err(e) => {
                log!("History export to {} failed: {}", path.display(), e);
                writeln!(self.output, "Export failed: {}", e)
            }
        }
    }

    #[cfg(test)]
    fn advance_clock(&mut self, by: Duration) {
        self.clock_offset += by;
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::tictactoe::{GameStatus, Mark};
    use std::io::Cursor;

    fn settings(mode: GameMode, limits: SearchLimits) -> GameSettings {
        GameSettings {
            mode,
            difficulty: Difficulty::Hard,
            names: PlayerNames::new("Ann", "Ben"),
            symbols: SymbolPair::default(),
            limits,
            time_limit: Duration::from_secs(30),
            export_path: PathBuf::from("unused.csv"),
            recent_count: 5,
        }
    }

    fn game(script: &str, mode: GameMode) -> TerminalGame<Cursor<&str>, Vec<u8>> {
        TerminalGame::new(
            Cursor::new(script),
            Vec::new(),
            settings(mode, SearchLimits::default()),
            SessionRng::new(8),
        )
    }

    fn output_text<R: BufRead>(game: &TerminalGame<R, Vec<u8>>) -> String {
        String::from_utf8(game.output().clone()).unwrap()
    }

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_client_history_{}.csv", random_number));
        path
    }

    #[test]
    fn test_parse_cells_and_commands() {
        assert_eq!(parse_command("1\n"), Ok(Command::Place(0)));
        assert_eq!(parse_command(" 9 "), Ok(Command::Place(8)));
        assert_eq!(parse_command("N"), Ok(Command::NewRound));
        assert_eq!(parse_command("stats"), Ok(Command::Stats));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command("e"), Ok(Command::Export(None)));
        assert_eq!(
            parse_command("e  out/games.csv "),
            Ok(Command::Export(Some(PathBuf::from("out/games.csv"))))
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_command("0").is_err());
        assert!(parse_command("10").is_err());
        assert!(parse_command("").is_err());
        assert!(parse_command("hello").is_err());
    }

    #[test]
    fn test_multiplayer_row_win_is_recorded() {
        let mut game = game("1\n4\n2\n5\n3\nq\n", GameMode::Multiplayer);
        game.run().unwrap();

        assert_eq!(game.state().status(), GameStatus::Player1Won);
        assert_eq!(game.scoreboard().scores().player1, 1);
        assert_eq!(game.scoreboard().history()[0].winner, "Ann");
        let text = output_text(&game);
        assert!(text.contains("🎉 Ann wins! (row 1 col 1 to row 1 col 3)"));
        assert!(text.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_new_round_extends_streak() {
        let mut game = game("1\n4\n2\n5\n3\nn\n1\n4\n2\n5\n3\nq\n", GameMode::Multiplayer);
        game.run().unwrap();

        assert_eq!(game.scoreboard().scores().player1, 2);
        assert_eq!(game.scoreboard().streaks().player1, 2);
        assert_eq!(game.scoreboard().history().len(), 2);
    }

    #[test]
    fn test_moves_after_round_end_are_refused() {
        let mut game = game("1\n4\n2\n5\n3\n6\nq\n", GameMode::Multiplayer);
        game.run().unwrap();

        assert_eq!(game.state().board()[5], Mark::Empty);
        assert!(output_text(&game).contains("The round is over"));
    }

    #[test]
    fn test_occupied_cell_keeps_turn() {
        let mut game = game("5\n5\nq\n", GameMode::Multiplayer);
        game.run().unwrap();

        assert_eq!(game.state().current_player(), PlayerSlot::Player2);
        assert!(output_text(&game).contains("Cell 4 is already marked"));
    }

    #[test]
    fn test_bot_answers_center_with_corner() {
        let mut game = game("5\nq\n", GameMode::SinglePlayer);
        game.run().unwrap();

        assert_eq!(game.state().board()[4], Mark::X);
        assert_eq!(game.state().board()[0], Mark::O);
        assert!(output_text(&game).contains("Ben plays 1"));
    }

    #[test]
    fn test_unbounded_bot_never_loses_to_scripted_human() {
        let mut game = TerminalGame::new(
            Cursor::new("1\n2\n3\n4\n5\n6\n7\n8\n9\nq\n"),
            Vec::new(),
            settings(GameMode::SinglePlayer, SearchLimits::unbounded()),
            SessionRng::new(3),
        );
        game.run().unwrap();

        assert!(game.state().is_over());
        assert_eq!(game.scoreboard().history().len(), 1);
        assert_eq!(game.scoreboard().scores().player1, 0);
    }

    #[test]
    fn test_late_move_forfeits_turn() {
        let mut game = game("5\nq\n", GameMode::Multiplayer);
        game.advance_clock(Duration::from_secs(31));
        game.run().unwrap();

        assert_eq!(game.state().board().empty_count(), 9);
        assert_eq!(game.state().current_player(), PlayerSlot::Player2);
        assert!(output_text(&game).contains("⏰ Ann ran out of time! Turn forfeited."));
    }

    #[test]
    fn test_bot_moves_after_human_forfeit() {
        let mut game = TerminalGame::new(
            Cursor::new("5\n5\nq\n"),
            Vec::new(),
            GameSettings {
                time_limit: Duration::from_secs(5),
                ..settings(GameMode::SinglePlayer, SearchLimits::default())
            },
            SessionRng::new(8),
        );
        game.advance_clock(Duration::from_secs(6));
        game.run().unwrap();

        let text = output_text(&game);
        let forfeit = text.find("⏰ Ann ran out of time! Turn forfeited.").unwrap();
        let reply = text.find("Ben plays 1").unwrap();
        assert!(forfeit < reply);

        // The bot's reply restarts the clock, so the second move lands.
        assert_eq!(game.state().board()[0], Mark::O);
        assert_eq!(game.state().board()[4], Mark::X);
        assert_eq!(game.state().board().empty_count(), 6);
        assert_eq!(game.state().current_player(), PlayerSlot::Player1);
    }

    #[test]
    fn test_stats_show_scores_and_history() {
        let mut game = game("1\n4\n2\n5\n3\ns\nq\n", GameMode::Multiplayer);
        game.run().unwrap();

        let text = output_text(&game);
        assert!(text.contains("🏆 Scores\nAnn: 1\nBen: 0\nDraws: 0\n"));
        assert!(text.contains("🔥 Win Streaks\nAnn: 1\nBen: 0\n"));
        assert!(text.contains("📜 Game History"));
        assert!(text.contains("❌❌❌\n⭕⭕⬜\n⬜⬜⬜\n"));
    }

    #[test]
    fn test_export_without_history() {
        let mut game = game("e\nq\n", GameMode::Multiplayer);
        game.run().unwrap();
        assert!(output_text(&game).contains("No rounds to export yet"));
    }

    #[test]
    fn test_export_writes_csv() {
        let path = get_temp_file_path();
        let script = format!("1\n4\n2\n5\n3\ne {}\nq\n", path.display());
        let mut game = TerminalGame::new(
            Cursor::new(script.as_str()),
            Vec::new(),
            settings(GameMode::Multiplayer, SearchLimits::default()),
            SessionRng::new(8),
        );
        game.run().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "timestamp,winner,board");
        assert!(lines[1].ends_with(",Ann,XXXOO____"));
    }

    #[test]
    fn test_end_of_input_stops_loop() {
        let mut game = game("5\n", GameMode::Multiplayer);
        game.run().unwrap();
        assert!(output_text(&game).ends_with("Goodbye!\n"));
    }
}
