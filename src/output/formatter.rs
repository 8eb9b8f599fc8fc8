use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::quiz::{archetype, ArchetypeId, Language};
use crate::scoring::{Insights, QuizResults};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Replace ASCII digits with Persian digits (۰-۹)
pub fn to_persian_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32('۰' as u32 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// Localize the digits of any number
pub fn format_number(n: impl ToString, lang: Language) -> String {
    match lang {
        Language::En => n.to_string(),
        Language::Fa => to_persian_digits(&n.to_string()),
    }
}

pub fn format_percent(percentage: u32, lang: Language) -> String {
    format!("{}%", format_number(percentage, lang))
}

/// Horizontal bar, `width` cells, filled in proportion to `percentage`
pub fn score_bar(percentage: u32, width: usize) -> String {
    let filled = ((percentage.min(100) as f64 / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar width that fits the terminal, 20 when piped
fn bar_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) => (w as usize).saturating_sub(48).clamp(10, 40),
        None => 20,
    }
}

fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn colored(text: &str, id: ArchetypeId, use_colors: bool) -> String {
    if use_colors {
        let (r, g, b) = archetype(id).rgb();
        text.truecolor(r, g, b).to_string()
    } else {
        text.to_string()
    }
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Every archetype in ranking order: rank, name, title, bar and percentage
pub fn format_results_table(results: &QuizResults, lang: Language, use_colors: bool) -> String {
    let width = bar_width();
    let labels: Vec<String> = results
        .ranking
        .iter()
        .map(|id| {
            let a = archetype(*id);
            format!("{} ({})", a.name(lang), a.title(lang))
        })
        .collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    results
        .ranking
        .iter()
        .zip(labels.iter())
        .enumerate()
        .map(|(idx, (id, label))| {
            let pct = results.percentage(*id);
            let rank = format!("{:>2}.", format_number(idx + 1, lang));
            let bar = score_bar(pct, width);
            let percent = format!("{:>4}", format_percent(pct, lang));
            if use_colors {
                format!(
                    "{} {}  {}  {}",
                    rank.dimmed(),
                    pad_right(label, label_width),
                    colored(&bar, *id, true),
                    percent.bold()
                )
            } else {
                format!("{} {}  {}  {}", rank, pad_right(label, label_width), bar, percent)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tab-separated `archetype score percentage`, in ranking order, no header
pub fn format_tsv(results: &QuizResults) -> String {
    results
        .ranking
        .iter()
        .map(|id| format!("{}\t{}\t{}", id, results.score(*id), results.percentage(*id)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn share_text(results: &QuizResults, lang: Language) -> Option<String> {
    let primary = archetype(results.primary()?);
    Some(match lang {
        Language::En => format!(
            "My dominant archetype is {} ({})! Try the TEDx Personality Archetype test yourself.",
            primary.name(lang),
            primary.title(lang)
        ),
        Language::Fa => format!(
            "کهن‌الگوی غالب من {} ({}) است! شما هم تست کهن‌الگوی شخصیتی TEDx را امتحان کنید.",
            primary.name(lang),
            primary.title(lang)
        ),
    })
}

fn strengths_text(id: ArchetypeId, lang: Language) -> String {
    let a = archetype(id);
    match lang {
        Language::En => format!(
            "As a {}, you possess {}.",
            a.name(lang),
            a.key_traits(lang).join(" and ")
        ),
        Language::Fa => format!(
            "به عنوان یک {}، شما {} را در خود دارید.",
            a.name(lang),
            a.key_traits(lang).join(" و ")
        ),
    }
}

fn secondary_text(primary: ArchetypeId, secondary: ArchetypeId, lang: Language) -> String {
    let (p, s) = (archetype(primary).name(lang), archetype(secondary).name(lang));
    match lang {
        Language::En => format!("The combination of {} and {} gives you unique power.", p, s),
        Language::Fa => format!("ترکیب {} و {} به شما قدرت منحصر به فردی می‌دهد.", p, s),
    }
}

fn shadow_text(id: ArchetypeId, lang: Language) -> String {
    let shadow = archetype(id).shadow(lang);
    match lang {
        Language::En => format!(
            "{} can be a challenge for you. Awareness is the first step to growth.",
            shadow
        ),
        Language::Fa => format!(
            "{} می‌تواند چالشی برای شما باشد. آگاهی از آن اولین قدم برای رشد است.",
            shadow
        ),
    }
}

fn weakest_text(id: ArchetypeId, lang: Language) -> String {
    let name = archetype(id).name(lang);
    match lang {
        Language::En => format!(
            "The {} archetype has the lowest score. Developing this aspect can help personality balance.",
            name
        ),
        Language::Fa => format!(
            "کهن‌الگوی {} کمترین امتیاز را دارد. توسعه این جنبه می‌تواند به تعادل شخصیتی کمک کند.",
            name
        ),
    }
}

/// Full results screen: primary archetype, insights, all scores and share text
pub fn format_dashboard(results: &QuizResults, lang: Language, use_colors: bool) -> String {
    let Some(insights) = Insights::from_results(results) else {
        return lang.pick("No results to show.", "نتیجه‌ای برای نمایش وجود ندارد.").to_string();
    };
    let primary = archetype(insights.primary);
    let mut lines: Vec<String> = Vec::new();

    lines.push(heading(
        lang.pick("Your Dominant Archetype", "کهن‌الگوی غالب شما"),
        use_colors,
    ));
    lines.push(format!(
        "{} ({})",
        colored(primary.name(lang), insights.primary, use_colors),
        primary.title(lang)
    ));
    let pct = format_percent(results.percentage(insights.primary), lang);
    lines.push(match lang {
        Language::En => format!("{} Match", pct),
        Language::Fa => format!("{} تطابق", pct),
    });
    lines.push(String::new());
    lines.push(primary.description(lang).to_string());
    lines.push(String::new());

    let separator = lang.pick(", ", "، ");
    lines.push(format!(
        "{}: {}",
        heading(lang.pick("Dominant Intelligence", "هوش برجسته"), use_colors),
        primary.intelligence(lang)
    ));
    lines.push(format!(
        "{}: {}",
        heading(lang.pick("Key Traits", "ویژگی‌های کلیدی"), use_colors),
        primary.key_traits(lang).join(separator)
    ));
    lines.push(format!(
        "{}: {}",
        heading(lang.pick("Shadow Trait", "سایه شخصیتی"), use_colors),
        primary.shadow(lang)
    ));

    lines.push(String::new());
    lines.push(heading(lang.pick("Your Strengths", "نقاط قوت شما"), use_colors));
    lines.push(format!("  {}", strengths_text(insights.primary, lang)));
    if let Some(secondary) = insights.secondary {
        lines.push(format!(
            "  {}: {}",
            lang.pick("Secondary Archetype", "کهن‌الگوی ثانویه"),
            secondary_text(insights.primary, secondary, lang)
        ));
    }

    lines.push(String::new());
    lines.push(heading(
        lang.pick("Potential Challenges", "چالش‌های احتمالی"),
        use_colors,
    ));
    lines.push(format!("  {}", shadow_text(insights.primary, lang)));
    if let Some(weakest) = insights.weakest {
        lines.push(format!(
            "  {}: {}",
            lang.pick("Weak Area", "نقطه ضعف"),
            weakest_text(weakest, lang)
        ));
    }

    lines.push(String::new());
    lines.push(heading(
        lang.pick("All Archetype Scores", "امتیاز تمام کهن‌الگوها"),
        use_colors,
    ));
    lines.push(format_results_table(results, lang, use_colors));

    if let Some(share) = share_text(results, lang) {
        lines.push(String::new());
        lines.push(heading(lang.pick("Share Result", "اشتراک‌گذاری نتیجه"), use_colors));
        lines.push(share);
    }

    lines.join("\n")
}

/// The reference table, one archetype per line
pub fn format_archetype_list(lang: Language, use_colors: bool) -> String {
    ArchetypeId::ALL
        .iter()
        .map(|id| {
            let a = archetype(*id);
            format!(
                "{:<10}  {} ({})  {}",
                id.as_str(),
                colored(a.name(lang), *id, use_colors),
                a.title(lang),
                a.intelligence(lang)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
