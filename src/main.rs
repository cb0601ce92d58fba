#[cfg(not(target_arch = "wasm32"))]
mod preview {
    use anyhow::Result;
    use clap::Parser;
    use std::path::PathBuf;

    use rev_robotics::config::SiteConfig;
    use rev_robotics::model::{ContentStore, Page, ViewState};
    use rev_robotics::render::{self, text};

    /// Print the Rev Robotics page as it would render in the browser.
    #[derive(Parser, Debug)]
    #[command(name = "rev-robotics", version, about, long_about = None)]
    pub struct Args {
        /// Which page to render
        #[arg(value_enum, default_value_t = Page::Progress)]
        page: Page,

        /// Section title to open
        #[arg(long, value_name = "SECTION")]
        open: Option<String>,

        /// Item id to expand (repeatable)
        #[arg(long, value_name = "ID")]
        expand: Vec<String>,

        /// Emit the view model as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Site config file (defaults to the embedded one)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    }

    pub fn run(args: Args) -> Result<()> {
        env_logger::init();

        let config = match &args.config {
            Some(path) => SiteConfig::load(path)?,
            None => SiteConfig::embedded()?,
        };
        let content = ContentStore::embedded()?;

        let mut state = ViewState::new(&content);
        state.finish_loading();
        state.select_page(args.page);
        if let Some(section) = &args.open {
            if !state.toggle_section(section) {
                log::warn!("No section titled {:?}", section);
            }
        }
        for id in &args.expand {
            if !state.toggle_item_info(id) {
                log::warn!("No item with id {:?}", id);
            }
        }

        match (state.page(), args.json) {
            (Page::Progress, true) => {
                println!("{}", serde_json::to_string_pretty(&render::progress_view(&content, &state))?)
            }
            (Page::Team, true) => {
                println!("{}", serde_json::to_string_pretty(&render::team_view(&content, &config))?)
            }
            (page, false) => {
                print!(
                    "{}",
                    text::render_nav(&config.title, &render::nav_entries(&state), state.is_audio_playing())
                );
                println!();
                let body = match page {
                    Page::Progress => text::render_progress(&config.title, &render::progress_view(&content, &state))?,
                    Page::Team => text::render_team(&render::team_view(&content, &config))?,
                };
                print!("{}", body);
            }
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    preview::run(preview::Args::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
