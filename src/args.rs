use clap::Parser;
use page_scribe::ScraperConfig;
use page_scribe::config::{default_max_pages, default_output_dir, default_wait_time_secs};
use page_scribe::utils::parse_or_default;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-scribe")]
#[command(about = "Crawls one website and saves the text of every page to its own file")]
#[command(version)]
pub struct Args {
    /// Website to scrape; prompts interactively when omitted
    pub url: Option<String>,

    /// Directory for the scraped text files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Maximum number of pages to scrape
    #[arg(short, long)]
    pub max_pages: Option<usize>,

    /// Seconds to wait for each page to load and settle
    #[arg(short, long)]
    pub wait_time: Option<u64>,

    /// WebDriver endpoint (the WEBDRIVER_URL environment variable wins)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub no_headless: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Build the scrape configuration from a config file, the command line or prompts
    pub fn into_config(self) -> Result<ScraperConfig, Box<dyn std::error::Error>> {
        let mut config = match (&self.config, &self.url) {
            (Some(path), _) => ScraperConfig::from_file(path)?,
            (None, Some(url)) => ScraperConfig::new(url),
            (None, None) => {
                let stdin = io::stdin();
                let mut stdout = io::stdout();
                prompt_for_config(&mut stdin.lock(), &mut stdout)?
            }
        };

        if self.config.is_some() {
            if let Some(url) = self.url {
                config.start_url = url;
            }
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(wait_time) = self.wait_time {
            config.wait_time_secs = wait_time;
        }
        if let Some(webdriver_url) = self.webdriver_url {
            config.webdriver_url = webdriver_url;
        }
        if self.no_headless {
            config.headless = false;
        }

        Ok(config)
    }
}

/// Ask for the seed, folder, page budget and wait time
///
/// Empty answers take the defaults, as do numbers that fail to parse.
pub fn prompt_for_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<ScraperConfig> {
    let url = ask(input, output, "\nEnter the website URL to scrape: ")?;
    let mut config = ScraperConfig::new(&url);

    let dir = ask(
        input,
        output,
        "Enter output folder name (press Enter for default 'scraped_pages'): ",
    )?;
    config.output_dir = if dir.is_empty() {
        default_output_dir()
    } else {
        PathBuf::from(dir)
    };

    let max_pages = ask(
        input,
        output,
        "Enter maximum number of pages to scrape (press Enter for default 50): ",
    )?;
    config.max_pages = parse_or_default(&max_pages, default_max_pages());

    let wait_time = ask(
        input,
        output,
        "Enter page load wait time in seconds (press Enter for default 5): ",
    )?;
    config.wait_time_secs = parse_or_default(&wait_time, default_wait_time_secs());

    Ok(config)
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{}", question)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompts_with_answers() {
        let mut input = Cursor::new("example.com\nout\n7\n2\n");
        let mut output = Vec::new();
        let config = prompt_for_config(&mut input, &mut output).unwrap();

        assert_eq!(config.seed_url().unwrap().as_str(), "https://example.com/");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.max_pages, 7);
        assert_eq!(config.wait_time_secs, 2);
        assert!(String::from_utf8(output).unwrap().contains("website URL"));
    }

    #[test]
    fn test_prompts_fall_back_to_defaults() {
        let mut input = Cursor::new("https://example.com\n\nmany\nslow\n");
        let mut output = Vec::new();
        let config = prompt_for_config(&mut input, &mut output).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("scraped_pages"));
        assert_eq!(config.max_pages, 50);
        assert_eq!(config.wait_time_secs, 5);
    }

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from([
            "page-scribe",
            "example.com",
            "--max-pages",
            "3",
            "--output-dir",
            "pages",
            "--no-headless",
        ]);
        let config = args.into_config().unwrap();
        assert_eq!(config.start_url, "example.com");
        assert_eq!(config.max_pages, 3);
        assert_eq!(config.output_dir, PathBuf::from("pages"));
        assert!(!config.headless);
        assert_eq!(config.wait_time_secs, 5);
    }
}
