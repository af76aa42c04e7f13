//! Prints the operator's CRD manifests as YAML
//!
//! Usage: `cargo run -p crds --bin crdgen > config/crd/crds.yaml`

fn main() -> anyhow::Result<()> {
    print!("{}", crds::crd_yaml_all()?);
    Ok(())
}
