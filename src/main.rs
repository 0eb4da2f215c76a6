use log::error;
use std::env;
use std::process::ExitCode;

use recipe_for::{
    Attribute, DetailView, RecipeClient, RecipeConfig, RecipeSummary, RenderedRecipe,
    SearchType, SearchView, SummaryImage,
};

const USAGE: &str = "Usage:
  recipe-for [--ingredient|-i] <query...>          list matching recipes
  recipe-for [--ingredient|-i] --pick <n> <query...>  show the n-th match
  recipe-for --open <url>                          show a recipe page";

enum Command {
    Search {
        search_type: SearchType,
        query: String,
        pick: Option<usize>,
    },
    Open(String),
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut search_type = SearchType::Title;
    let mut pick = None;
    let mut open = None;
    let mut words = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ingredient" | "-i" => search_type = SearchType::Ingredient,
            "--title" | "-t" => search_type = SearchType::Title,
            "--pick" | "-p" => {
                let n = iter.next().ok_or("--pick needs a number")?;
                let n: usize = n.parse().map_err(|_| format!("invalid number: {n}"))?;
                if n == 0 {
                    return Err("--pick starts at 1".to_string());
                }
                pick = Some(n);
            }
            "--open" | "-o" => open = Some(iter.next().ok_or("--open needs a URL")?.clone()),
            "--help" | "-h" => return Err(USAGE.to_string()),
            _ => words.push(arg.as_str()),
        }
    }

    if let Some(url) = open {
        return Ok(Command::Open(url));
    }
    if words.is_empty() {
        return Err(USAGE.to_string());
    }
    Ok(Command::Search {
        search_type,
        query: words.join(" "),
        pick,
    })
}

fn print_summaries(summaries: &[RecipeSummary]) {
    if summaries.is_empty() {
        println!("No recipes found.");
        return;
    }
    for (i, summary) in summaries.iter().enumerate() {
        let mut line = format!("{:>3}. {}", i + 1, summary.name);
        if !summary.source.is_empty() {
            line.push_str(&format!(" - {}", summary.source));
        }
        if let Some(time) = &summary.time {
            line.push_str(&format!(" [{time}]"));
        }
        println!("{line}");
        println!("     {}", summary.url);
        if let SummaryImage::Thumbnail(url) = &summary.image {
            println!("     thumbnail: {url}");
        }
    }
}

fn print_detail(rendered: &RenderedRecipe) {
    println!("{}", rendered.markdown);
    for attribute in &rendered.attributes {
        match attribute {
            Attribute::Label { title, text } => println!("{title}: {text}"),
            Attribute::Separator => println!("----"),
        }
    }
    println!();
    println!("Open in browser: {}", rendered.url);
}

async fn show_detail(client: &RecipeClient, summary: RecipeSummary) {
    let mut view = DetailView::new(summary);
    view.load(client).await;
    if let Some(notice) = view.take_notice() {
        eprintln!("error: {notice}");
    }
    print_detail(&view.render());
}

async fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let config = RecipeConfig::load()?;
    let client = RecipeClient::builder().config(&config).build()?;

    match command {
        Command::Open(url) => {
            let summary = RecipeSummary {
                name: url.clone(),
                url,
                source: String::new(),
                time: None,
                image: SummaryImage::Document,
            };
            show_detail(&client, summary).await;
        }
        Command::Search {
            search_type,
            query,
            pick,
        } => {
            let mut view = SearchView::new(search_type);
            view.search(query, &client).await;
            if let Some(notice) = view.take_notice() {
                eprintln!("error: {notice}");
            }

            match pick {
                None => print_summaries(view.results()),
                Some(n) => match view.results().get(n - 1) {
                    Some(summary) => show_detail(&client, summary.clone()).await,
                    None => {
                        return Err(format!("only {} results", view.results().len()).into())
                    }
                },
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
