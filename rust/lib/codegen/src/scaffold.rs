/// Support files shared by every generated model

use crate::{GeneratedFile, Language};

pub const DB_CLIENT_FILE: &str = "db-client.ts";
pub const CLUSTERING_ORDER_FILE: &str = "clustering-order.ts";

const DB_CLIENT: &str = r#"import cassandra from 'cassandra-driver';

const contactPoints = process.env.DB_CONTACT_POINTS;
const keyspace = process.env.DB_DEFAULT_KEYSPACE;
const localDataCenter = process.env.DB_LOCAL_DATA_CENTER;

if (!contactPoints) {
  throw new Error('DB_CONTACT_POINTS env variable is not set');
}

if (!keyspace) {
  throw new Error('DB_DEFAULT_KEYSPACE env variable is not set');
}

if (!localDataCenter) {
  throw new Error('DB_LOCAL_DATA_CENTER env variable is not set');
}

const username = process.env.DB_USERNAME;
const password = process.env.DB_PASSWORD;

export const dbClient = new cassandra.Client({
  contactPoints: contactPoints.split(','),
  keyspace,
  localDataCenter,
  credentials: username && password ? { username, password } : undefined,
  protocolOptions: {
    port: process.env.DB_PORT ? Number(process.env.DB_PORT) : undefined,
  },
});
"#;

const CLUSTERING_ORDER: &str = r#"/**
 * Drops the first element of a tuple type.
 */
type Shift<T extends readonly unknown[]> = T extends [unknown, ...infer R]
  ? R
  : [];

/**
 * Each key in `T` may only be present when every key before it is present.
 */
type StrictOrder<
  T extends readonly [string, unknown][],
  Acc extends object = object,
> = T extends []
  ? Acc
  :
      | (Acc & { [K in T[number] as K[0]]?: never })
      | StrictOrder<Shift<T>, Acc & { [K in T[0][0]]: T[0][1] }>;

/**
 * Restricts `Obj` to prefixes of `Keys`, mirroring how clustering keys can be
 * used in a query.
 *
 * @example
 *   type Keys = ClusteringOrder<
 *     { status: string; createdAt: Date },
 *     ['status', 'createdAt']
 *   >;
 *   const ok: Keys = { status: 'active' };
 *   const bad: Keys = { createdAt: new Date() }; // status missing
 */
export type ClusteringOrder<
  Obj extends Record<string, unknown>,
  Keys extends readonly (keyof Obj)[],
> = StrictOrder<{ [I in keyof Keys]: [Keys[I] & string, Obj[Keys[I]]] }>;
"#;

/// Files written once per models directory by `init`.
pub fn scaffold_files() -> Vec<GeneratedFile> {
    vec![
        GeneratedFile {
            path: DB_CLIENT_FILE.to_string(),
            content: DB_CLIENT.to_string(),
            language: Language::TypeScript,
        },
        GeneratedFile {
            path: CLUSTERING_ORDER_FILE.to_string(),
            content: CLUSTERING_ORDER.to_string(),
            language: Language::TypeScript,
        },
    ]
}
