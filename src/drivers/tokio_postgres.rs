use std::error::Error;

use async_trait::async_trait;
use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tokio_postgres::types::{to_sql_checked, Format, FromSql, IsNull, ToSql, Type};
use tokio_postgres::{Client, NoTls, Row, Statement};
use tracing::error;
use uuid::Uuid;

use crate::error::{BuilderxError, Result};
use crate::mapping::TIMESTAMP_FORMAT;
use crate::traits::DatabaseDriver;
use crate::types::{RawQueryResult, RawValue, SqlValue};

type BoxedParam = Box<dyn ToSql + Sync + Send>;

/// PostgreSQL driver implementation using tokio-postgres.
///
/// Every statement is prepared first so each bind value can be converted to
/// the parameter type the server inferred. Values are read back per cell; a
/// cell whose type has no decoder becomes [`RawValue::Undecodable`] and only
/// fails a scan that actually reads it.
pub struct TokioPostgresDriver {
    client: Client,
}

impl TokioPostgresDriver {
    /// Connect to a PostgreSQL database.
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
            .await
            .map_err(|e| BuilderxError::Connect(e.to_string()))?;

        // The connection object drives the socket; it ends when the client drops.
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "postgres connection closed with error");
            }
        });

        Ok(Self { client })
    }

    async fn prepare(&self, sql: &str, params: &[SqlValue]) -> Result<(Statement, Vec<BoxedParam>)> {
        let statement = self
            .client
            .prepare(sql)
            .await
            .map_err(|e| BuilderxError::Execution(e.to_string()))?;

        let types = statement.params();
        if types.len() != params.len() {
            return Err(BuilderxError::Execution(format!(
                "statement expects {} parameters, got {}",
                types.len(),
                params.len()
            )));
        }

        let converted = params
            .iter()
            .zip(types)
            .enumerate()
            .map(|(i, (value, ty))| bind_param(i + 1, value, ty))
            .collect::<Result<Vec<_>>>()?;

        Ok((statement, converted))
    }
}

#[async_trait]
impl DatabaseDriver for TokioPostgresDriver {
    async fn ping(&self) -> Result<()> {
        self.client
            .simple_query("SELECT 1")
            .await
            .map(|_| ())
            .map_err(|e| BuilderxError::Connect(e.to_string()))
    }

    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult> {
        let (statement, converted_params) = self.prepare(sql, params).await?;
        let param_refs = param_refs(&converted_params);

        let rows = self
            .client
            .query(&statement, &param_refs)
            .await
            .map_err(|e| BuilderxError::Execution(e.to_string()))?;

        let columns: Vec<String> = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let result_rows: Vec<Vec<RawValue>> = rows
            .iter()
            .map(|row| (0..row.len()).map(|i| decode_cell(row, i)).collect::<Vec<_>>())
            .collect();

        Ok(RawQueryResult::new(columns, result_rows))
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        let (statement, converted_params) = self.prepare(sql, params).await?;
        let param_refs = param_refs(&converted_params);

        self.client
            .execute(&statement, &param_refs)
            .await
            .map_err(|e| BuilderxError::Execution(e.to_string()))
    }
}

fn param_refs(converted: &[BoxedParam]) -> Vec<&(dyn ToSql + Sync)> {
    converted
        .iter()
        .map(|b| b.as_ref() as &(dyn ToSql + Sync))
        .collect()
}

/// Convert a SqlValue for the parameter type `ty` of placeholder `$position`.
///
/// Integers, floats, booleans and text headed for a parameter of their own
/// family are sent in binary, widening or range-checking integers. Anything
/// else, NULL included, goes in text format and the server parses it.
fn bind_param(position: usize, value: &SqlValue, ty: &Type) -> Result<BoxedParam> {
    let out_of_range = |n: &dyn std::fmt::Display| {
        BuilderxError::Execution(format!(
            "parameter ${}: {} is out of range for {}",
            position,
            n,
            ty.name()
        ))
    };

    let param: BoxedParam = match value {
        SqlValue::Int32(n) if *ty == Type::INT4 => Box::new(*n),
        SqlValue::Int32(n) if *ty == Type::INT8 => Box::new(i64::from(*n)),
        SqlValue::Int32(n) if *ty == Type::INT2 => {
            Box::new(i16::try_from(*n).map_err(|_| out_of_range(n))?)
        }
        SqlValue::Int64(n) if *ty == Type::INT8 => Box::new(*n),
        SqlValue::Int64(n) if *ty == Type::INT4 => {
            Box::new(i32::try_from(*n).map_err(|_| out_of_range(n))?)
        }
        SqlValue::Int64(n) if *ty == Type::INT2 => {
            Box::new(i16::try_from(*n).map_err(|_| out_of_range(n))?)
        }
        SqlValue::Float64(f) if *ty == Type::FLOAT8 => Box::new(*f),
        SqlValue::Bool(b) if *ty == Type::BOOL => Box::new(*b),
        SqlValue::Text(s) if <String as ToSql>::accepts(ty) => Box::new(s.clone()),
        other => Box::new(TextParam(text_form(other))),
    };
    Ok(param)
}

/// The literal Postgres would accept for `value` as typed input.
fn text_form(value: &SqlValue) -> Option<String> {
    match value {
        SqlValue::Null => None,
        SqlValue::Text(s) => Some(s.clone()),
        SqlValue::Int32(n) => Some(n.to_string()),
        SqlValue::Int64(n) => Some(n.to_string()),
        SqlValue::Float64(f) if f.is_infinite() => {
            Some(if *f > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
        }
        SqlValue::Float64(f) => Some(f.to_string()),
        SqlValue::Bool(b) => Some(b.to_string()),
    }
}

/// A bind value sent in the text wire format, `None` for NULL.
#[derive(Debug)]
struct TextParam(Option<String>);

impl ToSql for TextParam {
    fn to_sql(
        &self,
        _ty: &Type,
        out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn Error + Sync + Send>> {
        match &self.0 {
            Some(text) => {
                out.extend_from_slice(text.as_bytes());
                Ok(IsNull::No)
            }
            None => Ok(IsNull::Yes),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn encode_format(&self, _ty: &Type) -> Format {
        Format::Text
    }

    to_sql_checked!();
}

/// Read the cell at `index` as text. Types without a decoder are kept as
/// [`RawValue::Undecodable`] rather than failing the whole result set.
fn decode_cell(row: &Row, index: usize) -> RawValue {
    let column = &row.columns()[index];
    let text = match column.type_().name() {
        "bool" => render::<bool, _>(row, index, |b| b.to_string()),
        "int2" => render::<i16, _>(row, index, |n| n.to_string()),
        "int4" => render::<i32, _>(row, index, |n| n.to_string()),
        "int8" => render::<i64, _>(row, index, |n| n.to_string()),
        "oid" => render::<u32, _>(row, index, |n| n.to_string()),
        "float4" => render::<f32, _>(row, index, |n| n.to_string()),
        "float8" => render::<f64, _>(row, index, |n| n.to_string()),
        "timestamptz" => render::<DateTime<Utc>, _>(row, index, |t| t.to_rfc3339()),
        "timestamp" => render::<NaiveDateTime, _>(row, index, |t| {
            t.format(TIMESTAMP_FORMAT).to_string()
        }),
        "date" => render::<NaiveDate, _>(row, index, |d| d.to_string()),
        "time" => render::<NaiveTime, _>(row, index, |t| t.to_string()),
        "uuid" => render::<Uuid, _>(row, index, |u| u.to_string()),
        "json" | "jsonb" => render::<serde_json::Value, _>(row, index, |v| v.to_string()),
        _ => row.try_get::<_, Option<String>>(index),
    };

    match text {
        Ok(value) => RawValue::from(value),
        Err(e) => RawValue::Undecodable(format!(
            "{} ({}): {}",
            column.name(),
            column.type_().name(),
            e
        )),
    }
}

fn render<'a, T, F>(
    row: &'a Row,
    index: usize,
    to_text: F,
) -> std::result::Result<Option<String>, tokio_postgres::Error>
where
    T: FromSql<'a>,
    F: Fn(T) -> String,
{
    row.try_get::<_, Option<T>>(index).map(|v| v.map(to_text))
}
