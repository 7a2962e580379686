// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in catalog: the hybrid Hyperledger Fabric + ADI (zk rollup) solution architecture.
//!
//! Permissioned workflows run on Fabric; a bridge exports state commitments to the ADI L2, whose
//! proofs are verified on Ethereum L1.

use crate::atlas::Atlas;
use crate::integrity::ConfigIntegrityError;
use crate::model::{
    BrandMark, Catalog, Edge, EdgeId, EdgeLabel, EdgeStyle, FlowStep, Halo, LabelPlacement,
    LineStyle, Motion, Node, NodeCategory, NodeIcon, NodeId, Port, Position, Route, Side, Size,
    TextAnchor, View, ViewId, ViewTable,
};

pub const ARCHITECTURE_VIEW: &str = "architecture";
pub const SETTLEMENT_VIEW: &str = "settlement";

// Column and row anchors of the canvas grid.
const X_CLIENT: i32 = 80;
const X_FABRIC: i32 = 80;
const X_BRIDGE: i32 = 740;
const X_ADI: i32 = 1000;
const X_RIGHT: i32 = 1640;

const Y_CLIENTS: i32 = 60;
const Y_FABRIC: i32 = 240;
const Y_BRIDGE: i32 = 480;
const Y_ADI: i32 = 700;
const Y_ETHEREUM: i32 = 940;

const X_EXTERNAL: i32 = X_FABRIC + 130;
const Y_EXTERNAL: i32 = Y_FABRIC + 300;

// Ids below are literals that satisfy the id rules.
fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("built-in node id")
}

fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("built-in edge id")
}

fn vid(value: &str) -> ViewId {
    ViewId::new(value).expect("built-in view id")
}

fn glyph(value: &str) -> NodeIcon {
    NodeIcon::Glyph(value.to_owned())
}

fn node(id: &str, title: &str, category: NodeCategory, x: i32, y: i32, w: i32, h: i32) -> Node {
    Node::new(nid(id), title, category, Position::new(x, y), Size::new(w, h))
}

fn edge(id: &str, source: &str, source_port: Port, target: &str, target_port: Port) -> Edge {
    Edge::new(eid(id), nid(source), source_port, nid(target), target_port)
}

pub fn catalog() -> Catalog {
    Catalog::new(nodes(), edges()).with_flow(flow())
}

fn flow() -> Vec<FlowStep> {
    [
        "Clients submit transactions to Fabric (endorsement → order → commit).",
        "Bridge extracts block/state root; constructs Commitment and posts to ADI L2.",
        "Sequencer orders commitments; Prover generates zk proof of validity.",
        "Proof is verified on Ethereum L1 (verifier contract), anchoring finality.",
        "Optional callbacks/receipts flow back to Fabric or client services.",
        "Monitoring & analytics index events on Fabric/ADI/Ethereum for dashboards.",
    ]
    .into_iter()
    .zip(1..)
    .map(|(text, step)| FlowStep::new(step, text))
    .collect()
}

fn nodes() -> Vec<Node> {
    vec![
        node("client", "Client Applications", NodeCategory::User, X_CLIENT, Y_CLIENTS, 340, 100)
            .with_subtitle("Web • Mobile • Admin Portals")
            .with_icon(glyph("🌐"))
            .with_halo(Halo::Static)
            .with_caption("SDK (Fabric Gateway) · OIDC/IAM")
            .with_description("Web, Mobile, and Admin portals invoking Fabric chaincode via SDK."),
        node(
            "fabric",
            "Hyperledger Fabric Network",
            NodeCategory::Ledger,
            X_FABRIC,
            Y_FABRIC,
            560,
            240,
        )
        .with_subtitle("Peers • Orderer • CA • Chaincode • PDC")
        .with_icon(NodeIcon::Brand(BrandMark::Fabric))
        .with_halo(Halo::Static)
        .with_description("Peers, Orderer, CA; endorsement & private data collections."),
        node("fabric.org1", "Org1 Peers", NodeCategory::Ledger, X_FABRIC + 24, Y_FABRIC + 66, 240, 80)
            .with_subtitle("Endorsement & State DB"),
        node("fabric.org2", "Org2 Peers", NodeCategory::Ledger, X_FABRIC + 304, Y_FABRIC + 66, 240, 80)
            .with_subtitle("Endorsement & State DB"),
        node(
            "fabric.orderer",
            "Ordering Service",
            NodeCategory::Ledger,
            X_FABRIC + 24,
            Y_FABRIC + 166,
            220,
            60,
        ),
        node(
            "fabric.pdc",
            "Private Data Collections (PDC)",
            NodeCategory::Ledger,
            X_FABRIC + 280,
            Y_FABRIC + 166,
            260,
            60,
        ),
        node("offchain", "Off-chain Services", NodeCategory::Infra, X_RIGHT, Y_FABRIC, 300, 240)
            .with_subtitle("Oracles • Cron • Subgraph • Analytics")
            .with_icon(glyph("🛠️"))
            .with_halo(Halo::Static)
            .with_details(["Chainlink Feeds", "Event Indexer", "Monitoring / Alerts"])
            .with_description("Oracles, cron jobs, analytics & subgraph."),
        node(
            "external",
            "Interfaces to External Systems",
            NodeCategory::External,
            X_EXTERNAL,
            Y_EXTERNAL,
            300,
            180,
        )
        .with_icon(glyph("🔌"))
        .with_halo(Halo::Static)
        .with_details([
            "📄 Khasra P2",
            "🗺️ MP Bhulekh",
            "🪪 Samagra ID",
            "🏦 Bank/PG",
            "📍 GIS",
        ]),
        node("bridge", "Fabric ↔ ADI Bridge", NodeCategory::Bridge, X_BRIDGE, Y_BRIDGE, 320, 120)
            .with_subtitle("Relayer • Commitment Exporter")
            .with_icon(glyph("🔗"))
            .with_halo(Halo::Pulse(0))
            .with_caption("Merkle Root / State Diff")
            .with_description(
                "Relayer/connector that exports state commitments (Merkle roots) from Fabric and submits to ADI.",
            ),
        node("adi", "ADI L2 (ZK Rollup)", NodeCategory::Zk, X_ADI, Y_ADI, 520, 170)
            .with_subtitle("Sequencer • Prover • Data Availability")
            .with_icon(NodeIcon::Brand(BrandMark::Adi))
            .with_halo(Halo::Pulse(300))
            .with_description("Sequencer, Prover, Data Availability; produces zk proofs."),
        node("adi.sequencer", "Sequencer", NodeCategory::Zk, X_ADI + 20, Y_ADI + 60, 160, 80)
            .with_subtitle("Order commitments")
            .with_icon(glyph("⏩")),
        node("adi.prover", "Prover", NodeCategory::Zk, X_ADI + 190, Y_ADI + 60, 160, 80)
            .with_subtitle("Generate zkSNARK")
            .with_icon(glyph("🧮")),
        node("adi.da", "Data Availability", NodeCategory::Zk, X_ADI + 360, Y_ADI + 60, 160, 80)
            .with_subtitle("Commitment blobs")
            .with_icon(glyph("📦")),
        node("ethereum", "Ethereum L1", NodeCategory::Chain, X_ADI, Y_ETHEREUM, 380, 110)
            .with_subtitle("Verifier Contract • Finality Anchor")
            .with_icon(NodeIcon::Brand(BrandMark::Ethereum))
            .with_halo(Halo::Pulse(600))
            .with_description("Verifier contract validates proofs; optional settlement/finality anchor."),
        node("kms", "KMS / HSM / Web3Signer", NodeCategory::Infra, X_RIGHT, Y_ETHEREUM, 300, 110)
            .with_subtitle("Custodial Keys • Relayer")
            .with_icon(glyph("🔒"))
            .with_halo(Halo::Static)
            .with_description("HSM/KMS/Web3Signer for custodial keys and relayer ops."),
    ]
}

fn edges() -> Vec<Edge> {
    let dashed = EdgeStyle {
        line: LineStyle::Dashed,
        motion: Motion::Static,
    };

    vec![
        // Client bottom drops onto the left part of the Fabric box.
        edge(
            "client-fabric",
            "client",
            Port::new(Side::Bottom),
            "fabric",
            Port::at(Side::Top, -110),
        )
        .with_label(EdgeLabel::plain("Txn (endorse→order→commit)"))
        .with_step(1, "Client→Fabric")
        .with_route(Route::vertical_first()),
        edge(
            "fabric-external",
            "fabric",
            Port::new(Side::Bottom),
            "external",
            Port::new(Side::Top),
        )
        .with_label(EdgeLabel::plain("External registries / systems"))
        .with_route(Route::vertical_first()),
        edge(
            "pdc-bridge",
            "fabric.pdc",
            Port::new(Side::Right),
            "bridge",
            Port::new(Side::Left),
        )
        .with_label(EdgeLabel::plain("State root / block header"))
        .with_step(2, "Fabric→Bridge")
        .with_route(Route::horizontal_first()),
        edge(
            "bridge-sequencer",
            "bridge",
            Port::new(Side::Bottom),
            "adi.sequencer",
            Port::new(Side::Left),
        )
        .with_label(EdgeLabel::rich(
            "Commitment batch → Sequencer",
            ["Merkle root per Fabric block", "State diff for the epoch"],
        ))
        .with_step(3, "Bridge→ADI")
        .with_route(Route::vertical_first().with_lateral_offset(100))
        .with_label_placement(LabelPlacement {
            dx: -50,
            dy: 0,
            anchor: TextAnchor::End,
        })
        .with_style(EdgeStyle {
            line: LineStyle::Solid,
            motion: Motion::Animated,
        }),
        edge(
            "prover-ethereum",
            "adi.prover",
            Port::new(Side::Bottom),
            "ethereum",
            Port::new(Side::Top),
        )
        .with_label(EdgeLabel::plain("zk proof"))
        .with_step(4, "ADI→Ethereum")
        .with_route(Route::vertical_first().with_lateral_offset(2)),
        edge(
            "ethereum-kms",
            "ethereum",
            Port::new(Side::Right),
            "kms",
            Port::new(Side::Left),
        )
        .with_label(EdgeLabel::plain("Receipt / event (optional)"))
        .with_step(5, "Ethereum→KMS")
        .with_route(Route::horizontal_first())
        .with_style(dashed),
        // The three observability feeds share one intake rail left of the off-chain box.
        edge(
            "fabric-offchain",
            "fabric",
            Port::new(Side::Right),
            "offchain",
            Port::new(Side::Left),
        )
        .with_label(EdgeLabel::plain("Events / metrics"))
        .with_step(6, "Observability")
        .with_route(Route::horizontal_first().with_lateral_offset(440)),
        edge(
            "adi-offchain",
            "adi",
            Port::new(Side::Right),
            "offchain",
            Port::at(Side::Left, -30),
        )
        .with_route(Route::horizontal_first())
        .with_style(dashed),
        edge(
            "ethereum-offchain",
            "ethereum",
            Port::new(Side::Right),
            "offchain",
            Port::at(Side::Left, 30),
        )
        .with_route(Route::horizontal_first().with_lateral_offset(70))
        .with_style(dashed),
    ]
}

pub fn views() -> ViewTable {
    let catalog = catalog();
    let all_nodes = catalog.nodes().iter().map(|node| node.id().clone());
    let all_edges = catalog.edges().iter().map(|edge| edge.id().clone());

    ViewTable::new(vec![
        View::new(vid(ARCHITECTURE_VIEW), "Solution architecture")
            .with_description(
                "Permissioned workflows on Fabric with zk-rollup settlement on ADI, verified on Ethereum.",
            )
            .with_nodes(all_nodes)
            .with_edges(all_edges),
        View::new(vid(SETTLEMENT_VIEW), "Settlement path")
            .with_description(
                "Fabric state commitments batched on ADI, proven, and anchored on Ethereum L1.",
            )
            .with_nodes(
                [
                    "fabric",
                    "fabric.pdc",
                    "bridge",
                    "adi",
                    "adi.sequencer",
                    "adi.prover",
                    "adi.da",
                    "ethereum",
                ]
                .map(nid),
            )
            .with_edges(["pdc-bridge", "bridge-sequencer", "prover-ethereum"].map(eid))
            // Centre Ethereum under the prover so the proof drops straight down.
            .with_position(nid("ethereum"), Position::new(X_ADI + 80, Y_ETHEREUM)),
    ])
}

/// The built-in catalog and views, checked.
pub fn atlas() -> Result<Atlas, ConfigIntegrityError> {
    Atlas::new(catalog(), views())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{atlas, catalog, views, ARCHITECTURE_VIEW, SETTLEMENT_VIEW};
    use crate::model::{Position, Side};

    #[test]
    fn builtin_tables_pass_the_integrity_check() {
        let atlas = atlas().expect("built-in atlas");
        assert_eq!(atlas.views().len(), 2);
        assert_eq!(atlas.default_view_id().as_str(), ARCHITECTURE_VIEW);
    }

    #[test]
    fn every_view_edge_has_both_endpoints_in_the_view() {
        let catalog = catalog();
        for view in views().views() {
            let shown = view.nodes().iter().collect::<BTreeSet<_>>();
            for edge_id in view.edges() {
                let edge = catalog.edge(edge_id.as_str()).expect("edge in catalog");
                assert!(shown.contains(edge.source()), "{} / {}", view.id(), edge_id);
                assert!(shown.contains(edge.target()), "{} / {}", view.id(), edge_id);
            }
            for node_id in view.nodes() {
                assert!(catalog.contains_node(node_id.as_str()), "{node_id}");
            }
        }
    }

    #[test]
    fn settlement_view_moves_ethereum_under_the_prover() {
        let atlas = atlas().expect("built-in atlas");
        let resolved = atlas.resolve(SETTLEMENT_VIEW).expect("resolve");

        let ethereum = resolved.node("ethereum").expect("ethereum shown");
        let prover = resolved.node("adi.prover").expect("prover shown");
        assert_eq!(ethereum.position(), Position::new(1080, 940));

        let edge = resolved.edge("prover-ethereum").expect("proof edge");
        assert_eq!(edge.source_port().side, Side::Bottom);
        let from = edge.source_port().point(prover.position(), prover.size());
        let to = edge.target_port().point(ethereum.position(), ethereum.size());
        assert_eq!(from.x, to.x);

        assert!(resolved.node("client").is_none());
        assert!(resolved.edge("client-fabric").is_none());
    }

    #[test]
    fn architecture_view_keeps_default_positions() {
        let atlas = atlas().expect("built-in atlas");
        let resolved = atlas.resolve(ARCHITECTURE_VIEW).expect("resolve");
        assert_eq!(resolved.nodes(), atlas.catalog().nodes());
        assert_eq!(resolved.edges(), atlas.catalog().edges());
    }

    #[test]
    fn flow_steps_are_numbered_one_to_six() {
        let steps = catalog()
            .edges()
            .iter()
            .filter_map(|edge| edge.step())
            .collect::<Vec<_>>();
        assert_eq!(steps, vec![1, 2, 3, 4, 5, 6]);

        let walkthrough = catalog()
            .flow()
            .iter()
            .map(|step| step.step)
            .collect::<Vec<_>>();
        assert_eq!(walkthrough, steps);
    }
}
