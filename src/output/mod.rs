pub mod formatter;

pub use formatter::{
    format_archetype_list, format_dashboard, format_number, format_percent, format_results_table,
    format_tsv, score_bar, share_text, should_use_colors, to_persian_digits,
};
