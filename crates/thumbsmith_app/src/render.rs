use thumbsmith_core::AppViewModel;

const BAR_WIDTH: usize = 20;

/// Prints one frame of the view model. Loading frames collapse to a
/// progress line; terminal frames print whatever the session produced.
pub fn render(view: &AppViewModel) {
    if let Some(error) = &view.url_error {
        println!("! {error}");
        return;
    }
    if view.loading {
        println!("  [{}] {:>3}%", progress_bar(view.progress), view.progress);
        return;
    }
    if let Some(error) = &view.error {
        println!("! {error}");
        return;
    }

    if let Some(summary) = &view.summary {
        println!();
        println!("Video Summary");
        println!("-------------");
        println!("{summary}");
    }
    if let Some(thumbnail) = &view.current_thumbnail {
        println!();
        println!("Current thumbnail: {thumbnail}");
    }
    if let Some(elapsed) = &view.elapsed_label {
        println!("Total time to generate summary: {elapsed}");
    }
    if !view.generated.is_empty() {
        println!();
        println!("Generated thumbnails");
        println!("--------------------");
        for (index, url) in view.generated.iter().enumerate() {
            println!("  [{index}] {url}");
        }
    }
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    let mut bar = String::with_capacity(BAR_WIDTH);
    for slot in 0..BAR_WIDTH {
        bar.push(if slot < filled { '#' } else { ' ' });
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::progress_bar;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(0), " ".repeat(20));
        assert_eq!(progress_bar(50), format!("{}{}", "#".repeat(10), " ".repeat(10)));
        assert_eq!(progress_bar(100), "#".repeat(20));
        // Clamped above 100.
        assert_eq!(progress_bar(255), "#".repeat(20));
    }
}
