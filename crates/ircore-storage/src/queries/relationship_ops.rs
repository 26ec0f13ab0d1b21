//! CRUD for the `relationships` edge table.

use ircore_core::errors::IrResult;
use ircore_core::relationships::{RelationshipEdge, RelationshipType};
use rusqlite::{params, Connection};

use crate::errors::to_ir_err;

fn rel_type_to_str(t: RelationshipType) -> &'static str {
    match t {
        RelationshipType::Supersedes => "supersedes",
        RelationshipType::Supports => "supports",
        RelationshipType::Contradicts => "contradicts",
        RelationshipType::Related => "related",
        RelationshipType::DerivedFrom => "derived_from",
        RelationshipType::References => "references",
    }
}

fn str_to_rel_type(s: &str) -> Option<RelationshipType> {
    Some(match s {
        "supersedes" => RelationshipType::Supersedes,
        "supports" => RelationshipType::Supports,
        "contradicts" => RelationshipType::Contradicts,
        "related" => RelationshipType::Related,
        "derived_from" => RelationshipType::DerivedFrom,
        "references" => RelationshipType::References,
        _ => return None,
    })
}

pub fn add_relationship(conn: &Connection, edge: &RelationshipEdge) -> IrResult<()> {
    conn.execute(
        "INSERT INTO relationships (source_id, target_id, relationship_type, strength, evidence)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(source_id, target_id, relationship_type) DO UPDATE SET
            strength = excluded.strength,
            evidence = excluded.evidence",
        params![
            edge.source_id,
            edge.target_id,
            rel_type_to_str(edge.relationship_type),
            edge.strength.value(),
            serde_json::to_string(&edge.evidence).unwrap_or_default(),
        ],
    )
    .map_err(to_ir_err)?;
    Ok(())
}

pub fn remove_relationship(conn: &Connection, source_id: &str, target_id: &str) -> IrResult<()> {
    conn.execute(
        "DELETE FROM relationships WHERE source_id = ?1 AND target_id = ?2",
        params![source_id, target_id],
    )
    .map_err(to_ir_err)?;
    Ok(())
}

pub fn get_relationships(
    conn: &Connection,
    entry_id: &str,
    rel_type: Option<RelationshipType>,
) -> IrResult<Vec<RelationshipEdge>> {
    let sql = match rel_type {
        Some(_) => {
            "SELECT source_id, target_id, relationship_type, strength, evidence
             FROM relationships WHERE (source_id = ?1 OR target_id = ?1) AND relationship_type = ?2"
        }
        None => {
            "SELECT source_id, target_id, relationship_type, strength, evidence
             FROM relationships WHERE source_id = ?1 OR target_id = ?1"
        }
    };
    let mut stmt = conn.prepare(sql).map_err(to_ir_err)?;
    let type_str = rel_type.map(rel_type_to_str).unwrap_or("");
    let rows = if rel_type.is_some() {
        stmt.query_map(params![entry_id, type_str], parse_edge_row)
    } else {
        stmt.query_map(params![entry_id], parse_edge_row)
    }
    .map_err(to_ir_err)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(to_ir_err)?);
    }
    Ok(out)
}

fn parse_edge_row(row: &rusqlite::Row) -> rusqlite::Result<RelationshipEdge> {
    let type_str: String = row.get("relationship_type")?;
    let evidence: String = row.get("evidence")?;
    Ok(RelationshipEdge {
        source_id: row.get("source_id")?,
        target_id: row.get("target_id")?,
        relationship_type: str_to_rel_type(&type_str).unwrap_or(RelationshipType::Related),
        strength: row.get::<_, f64>("strength")?.into(),
        evidence: serde_json::from_str(&evidence).unwrap_or_default(),
    })
}
