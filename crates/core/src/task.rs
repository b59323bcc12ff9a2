use folio_protocol::NodeId;

/// Deferred work scheduled by a component: a timeout or a frame request.
///
/// Every task is delivered to every component; each one reacts only to its
/// own variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    TypeNext,
    ThemeSpringSettle,
    HeroSample,
    HeroFrame,
    ParallaxFrame,
    NavbarFrame,
    ScrollTopFrame,
    RevealTimelineItem(NodeId),
    /// Show a card matched by the filter selection numbered `generation`.
    ShowCard {
        node: NodeId,
        generation: u32,
    },
    SettleCard(NodeId),
    RemoveRipple(NodeId),
    ToastSlideOut(NodeId),
    RemoveToast(NodeId),
    TrailFrame,
}
