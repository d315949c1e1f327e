use anyhow::{Context, Result};
use axum::{routing::get, Router};
use colored::Colorize;
use maud::{html, Markup, DOCTYPE};
use silcrow_vite::{attach, App, AssetHost, ViteConfig, ViteTags};
use tower_http::trace::TraceLayer;

/// Run a preview app: `/` gets its tags injected, `/manual` renders them itself.
pub fn execute(
    mut config: ViteConfig,
    port: u16,
    asset_host: Option<&str>,
    production: bool,
) -> Result<()> {
    let asset_host = asset_host
        .map(str::parse::<AssetHost>)
        .transpose()
        .context("Invalid --asset-host")?;

    config.auto_insert = true;
    if production {
        config.debug = false;
    }

    println!();
    println!("{}", "🚀 Starting silcrow-vite preview server...".green().bold());
    println!();
    println!(
        "  {} {}",
        "Mode:".cyan(),
        if config.debug { "development" } else { "production" }
    );
    println!("  {} {}", "Assets:".cyan(), config.assets_dir().display());
    println!("  {} {:?}", "Asset host:".cyan(), asset_host);

    let router = Router::new()
        .route("/", get(index_handler))
        .route("/manual", get(manual_handler));

    let mut app = App::with_config(router, config);
    attach(&mut app, asset_host)?;
    let app = app.into_router().layer(TraceLayer::new_for_http());

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async move {
            let addr = format!("127.0.0.1:{}", port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;

            println!();
            println!("  {} {}", "URL:".cyan(), format!("http://{}", addr).bold());
            println!("  {} Press Ctrl+C to stop", "ℹ".cyan());
            println!();

            axum::serve(listener, app).await?;
            Ok::<(), anyhow::Error>(())
        })
}

fn page(title: &str, head: Option<Markup>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                @if let Some(head) = head {
                    (head)
                }
            }
            body {
                (body)
            }
        }
    }
}

async fn index_handler() -> Markup {
    page(
        "silcrow-vite",
        None,
        html! {
            h1 { "silcrow-vite preview" }
            p { "Tags were injected before </head> by the response interceptor." }
            a href="/manual" { "Rendered by hand" }
        },
    )
}

async fn manual_handler(tags: ViteTags) -> Markup {
    page(
        "silcrow-vite (manual)",
        Some(tags.into_markup()),
        html! {
            h1 { "Rendered by hand" }
            p { "This page placed the tags itself with the ViteTags extractor." }
        },
    )
}
