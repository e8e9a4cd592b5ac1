use console::Style;
use panorama_core::config::ViewerConfig;
use panorama_core::io::variants::VariantReport;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    tier: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            tier: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!();
}

pub fn print_catalog(config: &ViewerConfig) {
    let s = Styles::new();
    print_title(&s, "Resolution Tiers");

    println!(
        "  {:<8}{:<12}{:<10}{:<10}{}",
        s.label.apply_to("Tier"),
        s.label.apply_to("From scale"),
        s.label.apply_to("Width"),
        s.label.apply_to("Quality"),
        s.label.apply_to("Asset"),
    );
    for tier in &config.tiers {
        println!(
            "  {:<8}{:<12}{:<10}{:<10}{}",
            s.tier.apply_to(tier.tier.name()),
            s.value.apply_to(format!("{:.1}x", tier.min_scale)),
            s.value.apply_to(tier.width),
            s.value.apply_to(tier.quality),
            s.path.apply_to(&tier.locator),
        );
    }

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Zoom range"),
        s.value
            .apply_to(format!("{:.1}x - {:.1}x", config.zoom.min_scale, config.zoom.max_scale))
    );
    let priority: Vec<&str> = config.preload.priority.iter().map(|t| t.name()).collect();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Preload"),
        s.tier.apply_to(priority.join(", "))
    );
    println!();
}

pub fn print_reports(reports: &[VariantReport]) {
    let s = Styles::new();
    print_title(&s, "Generated Variants");

    let mut total = 0.0;
    for report in reports {
        total += report.size_mb();
        println!(
            "  {:<8}{:<14}{:<12}{}",
            s.tier.apply_to(report.tier.name()),
            s.value.apply_to(format!("{}x{}", report.width, report.height)),
            s.value.apply_to(format!("{:.2} MB", report.size_mb())),
            s.path.apply_to(report.output.display()),
        );
    }

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Total"),
        s.value.apply_to(format!("{:.2} MB", total))
    );
    println!();
}
