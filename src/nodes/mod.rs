//! Statically known node classes.
//!
//! Each submodule holds plain constructor functions, one per class,
//! turning a raw wrapper body into a typed [`Node`](crate::node::Node).
//! [`register_all`] wires them into a registry under their sanitized
//! class names; the global [`REGISTRY`](crate::registry::REGISTRY) calls
//! it once on first access.
//!
//! The real upstream surface counts hundreds of renderer classes. This
//! table carries the working subset the section strategies, dispatchers
//! and mutation passes exercise; anything else degrades into a
//! runtime-synthesized stub (see [`crate::parser::stub`]) with a
//! diagnostic that drives a manual addition here.

mod actions;
pub(crate) mod comments;
mod continuations;
mod endpoints;
mod lists;
mod markers;
mod menus;
mod misc;
mod panels;
mod shelves;
pub(crate) mod util;
mod video;

use crate::registry::NodeRegistry;

pub(crate) fn register_all(registry: &NodeRegistry) {
    // Video items
    registry.register_fn("Video", video::video);
    registry.register_fn("CompactVideo", video::compact_video);
    registry.register_fn("GridVideo", video::grid_video);
    registry.register_fn("PlaylistVideo", video::playlist_video);
    registry.register_fn("PlaylistPanelVideo", video::playlist_panel_video);

    // Layout containers
    registry.register_fn("SectionList", lists::section_list);
    registry.register_fn("ItemSection", lists::item_section);
    registry.register_fn("VerticalList", lists::vertical_list);
    registry.register_fn("HorizontalList", lists::horizontal_list);
    registry.register_fn("Grid", lists::grid);
    registry.register_fn("TwoColumnBrowseResults", lists::two_column_browse_results);
    registry.register_fn(
        "TwoColumnWatchNextResults",
        lists::two_column_watch_next_results,
    );
    registry.register_fn("Tab", lists::tab);
    registry.register_fn("PlaylistVideoList", lists::playlist_video_list);

    // Shelves
    registry.register_fn("Shelf", shelves::shelf);
    registry.register_fn("MusicShelf", shelves::music_shelf);
    registry.register_fn("MusicMixShelf", shelves::music_mix_shelf);
    registry.register_fn("MusicPlaylistShelf", shelves::music_playlist_shelf);
    registry.register_fn("PlaylistPanel", shelves::playlist_panel);

    // Continuations
    registry.register_fn("TimedContinuation", continuations::timed_continuation);
    registry.register_fn(
        "ItemSectionContinuation",
        continuations::item_section_continuation,
    );
    registry.register_fn(
        "SectionListContinuation",
        continuations::section_list_continuation,
    );
    registry.register_fn("LiveChatContinuation", continuations::live_chat_continuation);
    registry.register_fn(
        "MusicPlaylistShelfContinuation",
        continuations::music_playlist_shelf_continuation,
    );
    registry.register_fn(
        "MusicShelfContinuation",
        continuations::music_shelf_continuation,
    );
    registry.register_fn("GridContinuation", continuations::grid_continuation);
    registry.register_fn(
        "PlaylistPanelContinuation",
        continuations::playlist_panel_continuation,
    );
    registry.register_fn("ContinuationCommand", continuations::continuation_command);
    registry.register_fn("ContinuationItem", continuations::continuation_item);

    // Response-received actions
    registry.register_fn("NavigateAction", actions::navigate_action);
    registry.register_fn("ShowMiniplayerCommand", actions::show_miniplayer_command);
    registry.register_fn(
        "ReloadContinuationItemsCommand",
        actions::reload_continuation_items_command,
    );
    registry.register_fn(
        "AppendContinuationItemsAction",
        actions::append_continuation_items_action,
    );
    registry.register_fn("OpenPopupAction", actions::open_popup);

    // Endpoints
    registry.register_fn("NavigationEndpoint", endpoints::navigation_endpoint);
    registry.register_fn("BrowseEndpoint", endpoints::browse_endpoint);
    registry.register_fn("WatchEndpoint", endpoints::watch_endpoint);
    registry.register_fn("SearchEndpoint", endpoints::search_endpoint);
    registry.register_fn("UrlEndpoint", endpoints::url_endpoint);

    // Menus and buttons
    registry.register_fn("Menu", menus::menu);
    registry.register_fn("MenuServiceItem", menus::menu_service_item);
    registry.register_fn("Button", menus::button);
    registry.register_fn("ToggleButton", menus::toggle_button);
    registry.register_fn(
        "MusicMultiSelectMenuItem",
        menus::music_multi_select_menu_item,
    );

    // Comments
    registry.register_fn("CommentThread", comments::comment_thread);
    registry.register_fn("CommentView", comments::comment_view);

    // Entities
    registry.register_fn("MacroMarkersListEntity", markers::macro_markers_list_entity);

    // Alerts, panels, overlays
    registry.register_fn("Alert", panels::alert);
    registry.register_fn("AlertWithButton", panels::alert_with_button);
    registry.register_fn(
        "EngagementPanelSectionList",
        panels::engagement_panel_section_list,
    );
    registry.register_fn(
        "PlayerAnnotationsExpanded",
        panels::player_annotations_expanded,
    );
    registry.register_fn("PlayerOverlay", panels::player_overlay);
    registry.register_fn("LiveChatItemContextMenu", panels::live_chat_item_context_menu);

    // Misc
    registry.register_fn("Message", misc::message);
    registry.register_fn("PlayerErrorMessage", misc::player_error_message);
    registry.register_fn("VideoDetails", misc::video_details);
}
