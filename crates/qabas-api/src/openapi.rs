// OpenAPI specification generation
//
// Shared by the API server (Swagger UI) and the export-openapi binary.

use crate::api;
use crate::api::ListResponse;
use qabas_core::{
    Benefit, Chapter, CoffeeStory, ContactForm, ContactStatus, JoinRequest, JoinStatus, Playlist,
    Podcast, Principal, Video,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Qabas API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::videos::list_videos,
        api::videos::get_video,
        api::videos::record_view,
        api::videos::admin_list_videos,
        api::videos::create_video,
        api::videos::update_video,
        api::videos::delete_video,
        api::podcasts::list_podcasts,
        api::podcasts::get_podcast,
        api::podcasts::record_listen,
        api::podcasts::admin_list_podcasts,
        api::podcasts::create_podcast,
        api::podcasts::update_podcast,
        api::podcasts::delete_podcast,
        api::benefits::list_benefits,
        api::benefits::admin_list_benefits,
        api::benefits::create_benefit,
        api::benefits::update_benefit,
        api::benefits::delete_benefit,
        api::stories::list_stories,
        api::stories::get_story,
        api::stories::admin_list_stories,
        api::stories::create_story,
        api::stories::update_story,
        api::stories::delete_story,
        api::stories::admin_list_chapters,
        api::stories::create_chapter,
        api::stories::update_chapter,
        api::stories::delete_chapter,
        api::playlists::list_playlists,
        api::playlists::get_playlist,
        api::playlists::admin_list_playlists,
        api::playlists::create_playlist,
        api::playlists::update_playlist,
        api::playlists::delete_playlist,
        api::forms::submit_contact,
        api::forms::submit_join,
        api::forms::list_contact_forms,
        api::forms::update_contact_status,
        api::forms::delete_contact_form,
        api::forms::list_join_requests,
        api::forms::update_join_status,
        api::forms::delete_join_request,
    ),
    components(
        schemas(
            Video, Podcast, Benefit, CoffeeStory, Chapter, Playlist,
            ContactForm, ContactStatus, JoinRequest, JoinStatus, Principal,
            api::ErrorResponse,
            api::common::SuccessResponse,
            // Request types
            api::videos::CreateVideoRequest, api::videos::VideoChanges, api::videos::UpdateVideoRequest,
            api::podcasts::CreatePodcastRequest, api::podcasts::PodcastChanges, api::podcasts::UpdatePodcastRequest,
            api::benefits::CreateBenefitRequest, api::benefits::BenefitChanges, api::benefits::UpdateBenefitRequest,
            api::stories::CreateStoryRequest, api::stories::StoryChanges, api::stories::UpdateStoryRequest,
            api::stories::CreateChapterRequest, api::stories::ChapterChanges, api::stories::UpdateChapterRequest,
            api::playlists::CreatePlaylistRequest, api::playlists::PlaylistChanges, api::playlists::UpdatePlaylistRequest,
            api::forms::ContactRequest, api::forms::JoinRequestBody,
            api::forms::UpdateContactStatusRequest, api::forms::UpdateJoinStatusRequest,
            // Response types
            api::videos::ViewCountResponse, api::videos::UpdateVideoResponse,
            api::podcasts::ListenCountResponse,
            api::stories::StoryWithChapters,
            api::playlists::PlaylistWithVideos,
            crate::auth::routes::LoginRequest, crate::auth::routes::LoginResponse,
            crate::auth::routes::SessionResponse, crate::auth::routes::AdminStatusResponse,
            ListResponse<Video>,
            ListResponse<Podcast>,
            ListResponse<Benefit>,
            ListResponse<CoffeeStory>,
            ListResponse<Chapter>,
            ListResponse<Playlist>,
            ListResponse<ContactForm>,
            ListResponse<JoinRequest>,
        )
    ),
    tags(
        (name = "videos", description = "Video catalog"),
        (name = "podcasts", description = "Podcast episodes"),
        (name = "benefits", description = "Scholarly excerpts"),
        (name = "stories", description = "Coffee stories and chapters"),
        (name = "playlists", description = "Video playlists"),
        (name = "forms", description = "Contact and join forms"),
        (name = "admin", description = "Content management (admin only)")
    ),
    info(
        title = "Qabas API",
        version = "0.1.0",
        description = "API for the Qabas content platform: videos, podcasts, benefits, stories and forms",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> String {
        Self::openapi()
            .to_pretty_json()
            .expect("Failed to serialize OpenAPI spec")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_public_and_admin_paths() {
        let spec: serde_json::Value = serde_json::from_str(&ApiDoc::to_json()).unwrap();
        let paths = spec["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/videos"));
        assert!(paths.contains_key("/api/stories/{story_id}"));
        assert!(paths.contains_key("/api/admin/join-requests"));
    }
}
