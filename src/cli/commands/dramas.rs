use crate::api::DramaListParams;
use crate::config::Config;
use crate::db::Store;

pub struct DramaListArgs {
    pub q: Option<String>,
    pub genre: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub page: String,
    pub limit: Option<String>,
}

pub async fn cmd_list_dramas(config: &Config, args: DramaListArgs) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let params = DramaListParams {
        page: Some(args.page),
        limit: args.limit,
        q: args.q,
        genre: args.genre,
        status: args.status,
        sort: args.sort,
    };
    let query = params
        .into_query(config.catalog.default_page_size, config.catalog.max_page_size)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let (dramas, total) = store.list_dramas(&query).await?;

    if dramas.is_empty() {
        println!("No dramas found.");
        return Ok(());
    }

    println!(
        "Dramas (page {}/{}, {} total, sorted by {})",
        query.window.page(),
        query.window.total_pages(total),
        total,
        query.sort.as_str()
    );
    println!("{:-<70}", "");

    for drama in dramas {
        println!("[{}] {} ({})", drama.id, drama.title, drama.year);
        println!(
            "  Status: {} | Rating: {:.1} | Views: {}",
            drama.status, drama.rating, drama.view_count
        );
    }

    Ok(())
}
