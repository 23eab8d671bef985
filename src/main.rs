use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use teamview::application::services::{
    ChannelOption, ChannelSearchService, ForwardPostModal, OptionGroup, RootPostProps,
    ToastConnector, ToastOwnProps,
};
use teamview::domain::entities::{ChannelId, PostId};
use teamview::domain::errors::ForwardError;
use teamview::domain::services::{
    PostListItem, PostListOptions, ToastDecision, ToastProps, prepare_post_ids_for_post_list,
};
use teamview::domain::store::{PostStore, StoreSnapshot};
use teamview::infrastructure::{
    AppConfig, CliArgs, Command, SnapshotError, StorageManager, StoreChannelSearch, load_snapshot,
};
use teamview::presentation::{
    ForwardPostView, HelpCommandsPage, ToastWidget, render_to_string,
};

const FORWARD_WIDTH: u16 = 80;
const HELP_WIDTH: u16 = 80;
const HELP_HEIGHT: u16 = 80;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

async fn load_store(config: &AppConfig) -> Result<StoreSnapshot> {
    let path = config.snapshot.as_deref().ok_or(SnapshotError::Missing)?;
    let store = load_snapshot(path)
        .await
        .wrap_err("Failed to load store snapshot")?;
    Ok(store)
}

#[derive(Serialize)]
struct ToastReport<'a> {
    props: &'a ToastProps,
    decision: &'a ToastDecision,
    timeline: Vec<PostListItem>,
}

async fn run_toast(
    config: &AppConfig,
    channel: String,
    at_latest_post: bool,
    below: Vec<String>,
    json: bool,
) -> Result<()> {
    let store = load_store(config).await?;
    let connector = ToastConnector::new(config.selectors.cache_capacity);
    let own = ToastOwnProps {
        channel_id: ChannelId::from(channel),
        at_latest_post,
    };
    let below: Vec<PostId> = below.into_iter().map(PostId::from).collect();

    let props = connector.props(&store, &own);
    let decision = connector.decision(&store, &own, &below);
    info!(channel = %own.channel_id, count = decision.count, visible = decision.visible, "toast decided");

    if json {
        let options = PostListOptions {
            current_user_id: &store.current_user_id,
            last_viewed_at: Some(props.last_viewed_at),
            collapsed_threads: store.preferences.collapsed_threads,
            show_join_leave: store.preferences.join_leave_messages,
            show_date_separators: config.ui.show_date_separators,
        };
        let timeline = store
            .post_ids_in_channel(&own.channel_id)
            .map(|ids| prepare_post_ids_for_post_list(&store, ids, &options))
            .unwrap_or_default();

        let report = ToastReport {
            props: &props,
            decision: &decision,
            timeline,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let widget = ToastWidget::new(decision);
    if widget.message().is_some() {
        println!("{}", render_to_string(widget, config.ui.toast_width, 1));
    } else {
        println!("No unread messages");
    }
    Ok(())
}

fn post_preview(store: &StoreSnapshot, post_id: &PostId) -> Result<String> {
    let post = store.post(post_id).ok_or(ForwardError::PostUnavailable)?;
    let props = RootPostProps::from_store(store, post, None);

    let author = store
        .user(post.user_id())
        .map_or_else(|| post.user_id().to_string(), |user| format!("@{}", user.username()));
    let bot = if props.is_bot { " [BOT]" } else { "" };
    let archived = if props.channel_is_archived {
        " (archived channel)"
    } else {
        ""
    };

    Ok(format!("{author}{bot}{archived}: {}", post.message()))
}

fn forward_view_height(groups: &[OptionGroup], modal: &ForwardPostModal) -> u16 {
    let option_rows: usize = groups.iter().map(|group| 1 + group.options.len()).sum();
    let status_rows = usize::from(modal.post_error().is_some()) + usize::from(modal.bad_connection());
    // borders + picker + comment box
    u16::try_from(option_rows + status_rows + 6).unwrap_or(u16::MAX)
}

async fn run_forward(
    config: &AppConfig,
    storage: &StorageManager,
    post: String,
    search: Option<String>,
    channel: Option<String>,
    comment: Option<String>,
) -> Result<()> {
    let store = load_store(config).await?;
    let state = storage.load_state().wrap_err("Failed to load state")?;

    let post_id = PostId::from(post);
    let preview = post_preview(&store, &post_id)?;
    let post = store
        .post(&post_id)
        .ok_or(ForwardError::PostUnavailable)?;

    let recent: Vec<ChannelId> = state
        .recent_forward_channels
        .iter()
        .map(|id| ChannelId::from(id.as_str()))
        .collect();
    let port = Arc::new(StoreChannelSearch::from_store(&store, &recent));
    let search_service = ChannelSearchService::new(port, config.forward.recent_limit);

    let groups = match search.as_deref() {
        Some(term) => search_service
            .handle_input_change(term)
            .await
            .unwrap_or_default(),
        None => search_service.default_options().await,
    };

    let mut modal = ForwardPostModal::new(&store, post);
    if let Some(channel_id) = channel {
        let channel_id = ChannelId::from(channel_id);
        let channel = store
            .channel(&channel_id)
            .cloned()
            .ok_or_else(|| eyre!("Unknown channel {channel_id}"))?;
        modal.select_channel(&store, ChannelOption::from(channel));
    }
    if let Some(comment) = comment {
        modal.set_comment(comment);
    }

    let request = if modal.selected_channel().is_some() {
        modal.submit().ok()
    } else {
        None
    };

    println!("{preview}\n");
    let height = forward_view_height(&groups, &modal);
    println!(
        "{}",
        render_to_string(ForwardPostView::new(&modal, &groups, &store), FORWARD_WIDTH, height)
    );

    if let Some(request) = request {
        if let Err(e) = storage.record_forward(request.channel_id.as_str(), config.forward.recent_limit) {
            warn!(error = %e, "Failed to persist recent forward channels");
        }
        println!("{}", serde_json::to_string_pretty(&request)?);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let storage = StorageManager::new().wrap_err("Failed to locate configuration directory")?;
    let mut config = storage
        .load_config(args.config.as_deref())
        .wrap_err("Failed to load configuration")?;
    config.snapshot = storage.snapshot_path(args.snapshot.as_deref(), config.snapshot.as_deref());
    config.merge_with_args(&args);

    init_logging(&config)?;

    info!(version = teamview::VERSION, "Starting {}", teamview::NAME);

    match args.command {
        Command::Toast {
            channel,
            at_latest,
            below,
            json,
        } => run_toast(&config, channel, at_latest, below, json).await,
        Command::Forward {
            post,
            search,
            channel,
            comment,
        } => run_forward(&config, &storage, post, search, channel, comment).await,
        Command::Help => {
            println!("{}", render_to_string(HelpCommandsPage, HELP_WIDTH, HELP_HEIGHT));
            Ok(())
        }
    }
}
