use anyhow::Context as _;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use lpc_fmt::FormatOptions;

const CONFIG_FILE: &str = "lpcfmt.toml";

/// Layout settings. Flags win over the config file.
#[derive(Args, Debug, Default)]
pub(crate) struct StyleArgs {
    /// Config file to use instead of `./lpcfmt.toml`.
    #[arg(long)]
    config: Option<Utf8PathBuf>,
    #[arg(long)]
    print_width: Option<usize>,
    #[arg(long)]
    tab_width: Option<usize>,
    #[arg(long)]
    use_tabs: bool,
}

impl StyleArgs {
    pub(crate) fn load(&self) -> anyhow::Result<FormatOptions> {
        let mut options = match &self.config {
            Some(path) => read_config(path)?,
            None if Utf8Path::new(CONFIG_FILE).is_file() => read_config(Utf8Path::new(CONFIG_FILE))?,
            None => FormatOptions::default(),
        };
        self.apply(&mut options);
        tracing::debug!(?options, "resolved format options");
        Ok(options)
    }

    fn apply(&self, options: &mut FormatOptions) {
        if let Some(width) = self.print_width {
            options.print_width = width;
        }
        if let Some(width) = self.tab_width {
            options.tab_width = width;
        }
        if self.use_tabs {
            options.use_tabs = true;
        }
    }
}

fn read_config(path: &Utf8Path) -> anyhow::Result<FormatOptions> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
    parse_config(&text).with_context(|| format!("failed to parse `{path}`"))
}

fn parse_config(text: &str) -> Result<FormatOptions, toml::de::Error> {
    toml::from_str(text)
}
