use kube::CustomResourceExt;
use titanium::crd::MysqlCluster;

fn main() -> Result<(), serde_yaml::Error> {
    print!("{}", serde_yaml::to_string(&MysqlCluster::crd())?);
    Ok(())
}
