//! Defines the [`Ads`] configuration bundle and the [`AdBlocks`] snippets that
//! are woven into every detail page.

use serde::Deserialize;

/// The advertisement configuration for a domain/template/channel. Every field
/// is an HTML fragment or embed code which is inserted verbatim.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Ads {
    #[serde(rename = "gaCode")]
    pub ga_code: String,

    #[serde(rename = "detail_header", alias = "detailHeader")]
    pub detail_header: String,

    #[serde(rename = "detailTop")]
    pub detail_top: String,

    #[serde(rename = "detailBottom")]
    pub detail_bottom: String,

    #[serde(rename = "detailArticleCenter")]
    pub detail_article_center: String,
}

/// The wrapped ad snippets derived from an [`Ads`] bundle. They are rendered
/// once per run and then shared by every page.
#[derive(Clone, Debug, PartialEq)]
pub struct AdBlocks {
    /// Inserted into the body of a page after its second heading.
    pub center: String,

    /// Handed to the page template for every page.
    pub bottom: String,
}

impl From<&Ads> for AdBlocks {
    fn from(ads: &Ads) -> AdBlocks {
        AdBlocks {
            center: center_block(&ads.detail_article_center),
            bottom: bottom_block(&ads.detail_bottom),
        }
    }
}

fn center_block(embed: &str) -> String {
    format!(
        r#"
    <div class='ai-viewports ai-viewport-3'style="float:none;margin:3px 0 3px 0;text-align:center;">
        <div class="quads-ad-label">Advertisement</div>
        {}
    </div>
"#,
        embed
    )
}

fn bottom_block(embed: &str) -> String {
    format!(
        r#"
<div class="quads-location quads-ad8" id="quads-ad8" style="float:none;margin:3px 0 3px 0;text-align:center;">
    <div class="quads-ad-label">Advertisement</div>
    {}
</div>
"#,
        embed
    )
}
