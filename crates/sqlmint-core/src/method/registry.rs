use crate::{
    error::{CompileError, RegistryError},
    expr::SqlExpression,
    method::SqlMethod,
    obs::sink::{self, MetricsEvent},
};
use sqlmint_config::DialectName;
use sqlmint_primitives::LogicalType;
use std::{collections::BTreeMap, sync::Arc};

///
/// MethodRegistry
///
/// Immutable map from (receiver logical type, operation) to a compiler,
/// built once per dialect. Lookups need no locking; nothing is added or
/// removed after `build`.
///

#[derive(Clone, Debug)]
pub struct MethodRegistry {
    dialect: DialectName,
    methods: BTreeMap<LogicalType, BTreeMap<String, Arc<dyn SqlMethod>>>,
}

impl MethodRegistry {
    #[must_use]
    pub const fn builder(dialect: DialectName) -> MethodRegistryBuilder {
        MethodRegistryBuilder {
            dialect,
            methods: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn dialect(&self) -> DialectName {
        self.dialect
    }

    /// Exact lookup on (receiver, operation); there is no fallback to a
    /// wider type or another dialect.
    pub fn resolve(
        &self,
        receiver: LogicalType,
        operation: &str,
    ) -> Result<&dyn SqlMethod, CompileError> {
        self.methods
            .get(&receiver)
            .and_then(|ops| ops.get(operation))
            .map(Arc::as_ref)
            .ok_or_else(|| CompileError::UnsupportedOperation {
                receiver,
                operation: operation.to_string(),
                dialect: self.dialect,
            })
    }

    #[must_use]
    pub fn contains(&self, receiver: LogicalType, operation: &str) -> bool {
        self.resolve(receiver, operation).is_ok()
    }

    /// Resolve by the receiver's logical type and compile.
    pub fn compile(
        &self,
        operation: &str,
        receiver: SqlExpression,
        args: Vec<SqlExpression>,
    ) -> Result<SqlExpression, CompileError> {
        let receiver_type = receiver.logical_type();
        let result = self
            .resolve(receiver_type, operation)
            .and_then(|method| method.compile(receiver, args));

        match &result {
            Ok(expr) => {
                let folded = expr.is_literal();
                sink::record(MetricsEvent::MethodCompiled { operation, folded });
                tracing::debug!(
                    operation,
                    receiver = %receiver_type,
                    dialect = %self.dialect,
                    folded,
                    "compiled method"
                );
            }
            Err(err) => {
                sink::record(MetricsEvent::MethodRejected { operation });
                tracing::debug!(
                    operation,
                    receiver = %receiver_type,
                    dialect = %self.dialect,
                    error = %err,
                    "method rejected"
                );
            }
        }

        result
    }

    /// Registered keys in (type, operation) order.
    pub fn keys(&self) -> impl Iterator<Item = (LogicalType, &str)> {
        self.methods
            .iter()
            .flat_map(|(ty, ops)| ops.keys().map(move |op| (*ty, op.as_str())))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

///
/// MethodRegistryBuilder
///

#[derive(Debug)]
pub struct MethodRegistryBuilder {
    dialect: DialectName,
    methods: BTreeMap<LogicalType, BTreeMap<String, Arc<dyn SqlMethod>>>,
}

impl MethodRegistryBuilder {
    /// Register `method` for `receiver`. A second compiler for the same
    /// key is a configuration error.
    pub fn register(
        &mut self,
        receiver: LogicalType,
        method: Arc<dyn SqlMethod>,
    ) -> Result<&mut Self, RegistryError> {
        let operation = method.operation().to_string();
        if !method.accepts(receiver) {
            return Err(RegistryError::ReceiverType {
                receiver,
                operation,
            });
        }

        let ops = self.methods.entry(receiver).or_default();
        if ops.contains_key(&operation) {
            return Err(RegistryError::Conflict {
                receiver,
                operation,
            });
        }
        ops.insert(operation, method);

        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> MethodRegistry {
        MethodRegistry {
            dialect: self.dialect,
            methods: self.methods,
        }
    }
}

///
/// TESTS
///
