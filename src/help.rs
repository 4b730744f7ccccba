use crate::terminal::Terminal;
use crossterm::style::Color;
use pascalart::mode::ViewMode;

const CONTROLS: &str = "\
s        Start animation
p/Space  Pause animation
r        Reset animation
←/→      Adjust main slider
↑/↓      Adjust run length (hockey-stick)
+/-      More or fewer rows
?        Toggle this help
q/Esc    Quit";

/// Help text listing the modes and the keys, titled with the current mode
pub fn build_help(current: ViewMode) -> String {
    let mut text = format!("PASCAL'S TRIANGLE - {}\n\n", current.label().to_uppercase());
    for (i, mode) in ViewMode::ALL.iter().enumerate() {
        let marker = if *mode == current { '*' } else { ' ' };
        text.push_str(&format!("{}{}        {}\n", marker, i + 1, mode.label()));
    }
    text.push('\n');
    text.push_str(CONTROLS);
    text
}

/// Render a centered help overlay box with the provided text.
pub fn render_help_overlay(term: &mut Terminal, help_text: &str) {
    if help_text.is_empty() {
        return;
    }

    let (width, height) = term.size();
    let lines: Vec<&str> = help_text.lines().collect();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines.len() + 2; // 1 row padding top/bottom

    // Center the box
    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;

    let border = Some(Color::White);
    let text = Some(Color::Grey);
    let bg = Some(Color::Black);

    let horizontal = "─".repeat(box_width - 2);
    term.set_str(start_x as i32, start_y as i32, &format!("┌{}┐", horizontal), border, bg, false);

    for (i, line) in lines.iter().enumerate() {
        let y = (start_y + 1 + i) as i32;
        let padding = max_width.saturating_sub(line.chars().count());
        term.set(start_x as i32, y, '│', border, bg, false);
        term.set_str(
            (start_x + 1) as i32,
            y,
            &format!(" {}{} ", line, " ".repeat(padding)),
            text,
            bg,
            false,
        );
        term.set((start_x + box_width - 1) as i32, y, '│', border, bg, false);
    }

    let bottom_y = (start_y + box_height - 1) as i32;
    term.set_str(start_x as i32, bottom_y, &format!("└{}┘", horizontal), border, bg, false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_marks_current_mode() {
        let text = build_help(ViewMode::Fractal);
        assert!(text.starts_with("PASCAL'S TRIANGLE - FRACTAL STRUCTURE"));
        assert!(text.contains("*5        Fractal structure"));
        assert!(text.contains(" 1        Row sums (2^n)"));
        assert!(text.contains("q/Esc    Quit"));
    }

    #[test]
    fn overlay_draws_box() {
        let mut term = Terminal::offscreen(30, 5);
        render_help_overlay(&mut term, "hi");
        let out = term.text();
        assert!(out.contains("┌────┐"));
        assert!(out.contains("│ hi │"));
        assert!(out.contains("└────┘"));
    }
}
