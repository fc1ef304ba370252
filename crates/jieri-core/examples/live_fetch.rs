use chrono::Local;
use jieri_core::ics::{BuildConfig, CalendarBuilder};
use jieri_core::{KeywordGroups, RiliClient, Spider, Strictness};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let builder = CalendarBuilder::new(BuildConfig::new(Local::now().naive_local()))
        .strictness(Strictness::Lenient)
        .exclude_if(KeywordGroups::redaction_default());
    // Writer is unused here; `festivals` stops before the write stage.
    let spider = Spider::new(RiliClient::new()?, jieri_core::FsWriter::default(), builder);

    println!("Fetching festival list...\n");

    let (year, festivals) = spider.festivals().await?;

    println!("{} festivals in {}:", festivals.len(), year);
    for festival in &festivals {
        println!(
            "  {} #{} {}",
            festival.date_stamp(),
            festival.sequence,
            festival.name()
        );
    }

    Ok(())
}
