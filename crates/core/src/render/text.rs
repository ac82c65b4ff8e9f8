use crate::render::budget::{AmountRow, BudgetPanel, Tone};
use crate::render::cards::Card;
use crate::render::itinerary::DayCard;
use crate::render::{
    ResultsView, Screen, SubmissionView, SummaryPanel, TabContent, APP_TAGLINE, APP_TITLE,
};
use owo_colors::OwoColorize;

const INDENT: &str = "  ";
const AMOUNT_LABEL_WIDTH: usize = 28;
const AMOUNT_WIDTH: usize = 12;

#[derive(Debug, Clone)]
pub struct TextStyle {
    pub color: bool,
    pub width: usize,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: false,
            width: 80,
        }
    }
}

pub fn screen_to_string(screen: &Screen, style: &TextStyle) -> String {
    let mut out = Writer {
        style,
        lines: Vec::new(),
    };
    out.line(out.strong(APP_TITLE));
    out.line(out.dim(APP_TAGLINE));
    out.blank();

    match screen {
        Screen::Submission(view) => out.submission(view),
        Screen::Results(view) => out.results(view),
    }

    let mut text = out.lines.join("\n");
    text.push('\n');
    text
}

struct Writer<'a> {
    style: &'a TextStyle,
    lines: Vec<String>,
}

impl Writer<'_> {
    fn line(&mut self, s: impl Into<String>) {
        self.lines.push(s.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn prose(&mut self, text: &str, indent: &str) {
        if text.trim().is_empty() {
            return;
        }
        let width = self.style.width.max(20);
        let opts = textwrap::Options::new(width)
            .initial_indent(indent)
            .subsequent_indent(indent);
        self.line(textwrap::fill(text.trim(), opts));
    }

    fn strong(&self, s: &str) -> String {
        if self.style.color {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn dim(&self, s: &str) -> String {
        if self.style.color {
            s.dimmed().to_string()
        } else {
            s.to_string()
        }
    }

    fn toned(&self, s: &str, tone: Tone) -> String {
        match (self.style.color, tone) {
            (false, _) => s.to_string(),
            (true, Tone::Positive) => s.green().to_string(),
            (true, Tone::Negative) => s.red().to_string(),
        }
    }

    fn heading(&mut self, title: &str) {
        let s = format!("== {title} ==");
        self.line(self.strong(&s));
    }

    fn submission(&mut self, view: &SubmissionView) {
        self.heading(view.title);
        self.line(self.dim(view.description));
        self.blank();

        if view.input.trim().is_empty() {
            let placeholder = self.dim(view.placeholder);
            self.line(format!("> {placeholder}"));
        } else {
            self.prose(&view.input, "> ");
        }

        let button = if view.submit.busy {
            format!("[ ... {} ] (disabled)", view.submit.label)
        } else {
            format!("[ {} ]", view.submit.label)
        };
        self.line(self.strong(&button));

        if let Some(error) = &view.error {
            self.blank();
            let s = format!("! {error}");
            self.line(self.toned(&s, Tone::Negative));
        }
    }

    fn results(&mut self, view: &ResultsView) {
        self.summary(&view.summary);
        if let Some(budget) = &view.budget {
            self.blank();
            self.budget(budget);
        }

        self.blank();
        let tabs: Vec<String> = view
            .tabs
            .iter()
            .map(|t| {
                if t.selected {
                    self.strong(&format!("[{}]", t.label))
                } else {
                    format!(" {} ", t.label)
                }
            })
            .collect();
        self.line(tabs.join(" | "));
        self.blank();

        match &view.content {
            TabContent::Itinerary(days) => {
                for day in days {
                    self.day(day);
                    self.blank();
                }
            }
            TabContent::Places(cards)
            | TabContent::Restaurants(cards)
            | TabContent::Hotels(cards) => {
                if cards.is_empty() {
                    self.line(self.dim("Nothing to show."));
                    self.blank();
                }
                for card in cards {
                    self.card(card);
                    self.blank();
                }
            }
        }

        let reset = format!("[ {} ]", view.reset_label);
        self.line(self.strong(&reset));
    }

    fn summary(&mut self, panel: &SummaryPanel) {
        self.heading(panel.title);
        self.prose(&panel.overview, "");
        for fact in &panel.facts {
            self.line(format!("{INDENT}{}: {}", fact.label, fact.value));
        }
    }

    fn budget(&mut self, panel: &BudgetPanel) {
        self.heading(panel.title);
        self.line(self.toned(&panel.headline, panel.tone));
        for row in &panel.components {
            self.amount(row);
        }
        self.line(format!(
            "{INDENT}{}",
            "-".repeat(AMOUNT_LABEL_WIDTH + AMOUNT_WIDTH)
        ));
        self.amount(&panel.total);
        self.amount(&panel.user_budget);
        let balance = amount_row(&panel.balance);
        self.line(self.toned(&balance, panel.tone));
    }

    fn amount(&mut self, row: &AmountRow) {
        self.line(amount_row(row));
    }

    fn day(&mut self, day: &DayCard) {
        let heading = format!("-- {} --", day.heading);
        self.line(self.strong(&heading));
        if let Some(cost) = &day.estimated_cost {
            self.line(self.dim(cost));
        }
        for activity in &day.activities {
            self.line(format!("{INDENT}[{}] {}", activity.time, activity.title));
            self.prose(&activity.description, "      ");
            if !activity.meta.is_empty() {
                let meta = format!("      {}", activity.meta.join(" · "));
                self.line(self.dim(&meta));
            }
        }
        let meals: Vec<String> = day
            .meals
            .iter()
            .map(|m| format!("{}: {}", m.label, m.value))
            .collect();
        self.line(format!("{INDENT}{}", meals.join(" | ")));
        if let Some(tips) = &day.tips {
            self.prose(&format!("Tips for the Day: {tips}"), INDENT);
        }
    }

    fn card(&mut self, card: &Card) {
        let mut title = format!("-- {}", card.title);
        if let Some(badge) = &card.badge {
            title.push_str(&format!(" <{badge}>"));
        }
        title.push_str(" --");
        self.line(self.strong(&title));
        self.line(self.dim(&card.rating_line));
        self.prose(&card.description, "");

        for row in &card.details {
            self.line(format!("{INDENT}{}: {}", row.label, row.value));
        }
        if let Some(tags) = &card.tags {
            let badges: Vec<String> = tags.badges.iter().map(|b| format!("[{b}]")).collect();
            self.line(format!("{INDENT}{}: {}", tags.heading, badges.join(" ")));
        }
        for note in &card.notes {
            self.line(format!("{INDENT}{note}"));
        }
        if let Some(tip) = &card.tip {
            self.prose(&format!("Tip: {tip}"), INDENT);
        }

        let image = if card.image.is_placeholder {
            format!("{INDENT}Image: {} (placeholder)", card.image.src)
        } else {
            format!("{INDENT}Image: {}", card.image.src)
        };
        self.line(self.dim(&image));
        if let Some(maps) = &card.maps {
            let suffix = if maps.new_context {
                " (opens in a new window)"
            } else {
                ""
            };
            self.line(format!("{INDENT}{}: {}{suffix}", maps.label, maps.href));
        }
    }
}

fn amount_row(row: &AmountRow) -> String {
    format!(
        "{INDENT}{:<label$}{:>amount$}",
        row.label,
        row.amount,
        label = AMOUNT_LABEL_WIDTH,
        amount = AMOUNT_WIDTH
    )
}
