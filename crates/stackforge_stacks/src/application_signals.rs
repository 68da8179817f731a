//! Application-observability demo stack.
//!
//! One VPC with a public and a protected subnet tier, an internet-facing
//! load balancer in front of a single containerized service, the IAM
//! roles and log group the service needs, and the image repository it
//! pulls from. Declaration order mirrors a natural construction order;
//! the compiler reorders by dependency regardless.

use indexmap::IndexMap;
use stackforge_core::{AttrValue, Attributes, BuildResult, ResourceKind};
use stackforge_plan::Registry;

fn attrs<const N: usize>(entries: [(&str, AttrValue); N]) -> Attributes {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Declare the application-signals demo stack
///
/// # Errors
///
/// Returns an error only if a declaration fails, which cannot happen for
/// this fixed declaration set.
pub fn declare() -> BuildResult<Registry> {
    let mut registry = Registry::new();

    let vpc = registry.declare(
        "app-vpc",
        ResourceKind::Network,
        attrs([
            ("cidr", AttrValue::from("10.100.0.0/16")),
            ("max-azs", AttrValue::from(2)),
            ("nat-gateways", AttrValue::from(1)),
        ]),
    )?;

    let public_subnet = registry.declare(
        "public-subnet",
        ResourceKind::Subnet,
        attrs([
            ("group-name", AttrValue::from("Public")),
            ("cidr-mask", AttrValue::from(24)),
            ("type", AttrValue::from("public")),
            ("network", AttrValue::Ref(vpc.attr("cidr"))),
        ]),
    )?;

    let protected_subnet = registry.declare(
        "protected-subnet",
        ResourceKind::Subnet,
        attrs([
            ("group-name", AttrValue::from("Protected")),
            ("cidr-mask", AttrValue::from(24)),
            ("type", AttrValue::from("private-with-egress")),
            ("network", AttrValue::Ref(vpc.attr("cidr"))),
        ]),
    )?;

    // NAT instance accepts anything originating inside the VPC
    registry.declare(
        "nat-ingress",
        ResourceKind::SecurityRule,
        attrs([
            ("direction", AttrValue::from("ingress")),
            ("ports", AttrValue::from("all")),
            ("source", AttrValue::Ref(vpc.attr("cidr"))),
        ]),
    )?;

    let sg_alb = registry.declare(
        "sg-alb",
        ResourceKind::SecurityRule,
        attrs([
            ("group-name", AttrValue::from("sg-alb")),
            ("network", AttrValue::Ref(vpc.attr("cidr"))),
            ("allow-all-outbound", AttrValue::from(false)),
            (
                "ingress",
                AttrValue::List(vec![AttrValue::Map(IndexMap::from([
                    ("port".to_string(), AttrValue::from(80)),
                    ("source".to_string(), AttrValue::from("0.0.0.0/0")),
                ]))]),
            ),
            (
                "egress",
                AttrValue::List(vec![AttrValue::Map(IndexMap::from([
                    ("ports".to_string(), AttrValue::from("all-tcp")),
                    ("destination".to_string(), AttrValue::from("0.0.0.0/0")),
                ]))]),
            ),
        ]),
    )?;

    // Service tier only accepts traffic forwarded by the load balancer
    let sg_service = registry.declare(
        "sg-service",
        ResourceKind::SecurityRule,
        attrs([
            ("group-name", AttrValue::from("sg-service")),
            ("network", AttrValue::Ref(vpc.attr("cidr"))),
            ("allow-all-outbound", AttrValue::from(false)),
            (
                "ingress",
                AttrValue::List(vec![AttrValue::Map(IndexMap::from([
                    ("port".to_string(), AttrValue::from(80)),
                    (
                        "source".to_string(),
                        AttrValue::Ref(sg_alb.attr("group-name")),
                    ),
                ]))]),
            ),
            (
                "egress",
                AttrValue::List(vec![AttrValue::Map(IndexMap::from([
                    ("ports".to_string(), AttrValue::from("all-tcp")),
                    ("destination".to_string(), AttrValue::from("0.0.0.0/0")),
                ]))]),
            ),
        ]),
    )?;

    let alb = registry.declare(
        "app-alb",
        ResourceKind::LoadBalancer,
        attrs([
            ("name", AttrValue::from("app-alb")),
            ("internet-facing", AttrValue::from(true)),
            ("security-group", AttrValue::Ref(sg_alb.attr("group-name"))),
            (
                "subnet-group",
                AttrValue::Ref(public_subnet.attr("group-name")),
            ),
        ]),
    )?;

    let execution_role = registry.declare(
        "task-execution-role",
        ResourceKind::Role,
        attrs([
            ("role-name", AttrValue::from("app-task-execution-role")),
            ("assumed-by", AttrValue::from("ecs-tasks.amazonaws.com")),
            (
                "managed-policies",
                AttrValue::from(vec!["service-role/AmazonECSTaskExecutionRolePolicy"]),
            ),
        ]),
    )?;

    let task_role = registry.declare(
        "task-role",
        ResourceKind::Role,
        attrs([
            ("role-name", AttrValue::from("app-task-role")),
            ("assumed-by", AttrValue::from("ecs-tasks.amazonaws.com")),
            (
                "managed-policies",
                AttrValue::from(vec!["AmazonSSMFullAccess", "CloudWatchAgentServerPolicy"]),
            ),
        ]),
    )?;

    let task_definition = registry.declare(
        "service-task",
        ResourceKind::TaskDefinition,
        attrs([
            ("family", AttrValue::from("app-service-task")),
            ("cpu", AttrValue::from(256)),
            ("memory-mib", AttrValue::from(512)),
            (
                "execution-role",
                AttrValue::Ref(execution_role.attr("role-name")),
            ),
            ("task-role", AttrValue::Ref(task_role.attr("role-name"))),
        ]),
    )?;

    let log_group = registry.declare(
        "service-logs",
        ResourceKind::LogGroup,
        attrs([
            ("log-group-name", AttrValue::from("app-service-logs")),
            ("retention-days", AttrValue::from(90)),
            ("removal-policy", AttrValue::from("retain")),
        ]),
    )?;

    // Imported by physical name; the repository itself is provisioned by
    // the ecr stack
    let repository = registry.declare(
        "apm-test",
        ResourceKind::Repository,
        attrs([("repository-name", AttrValue::from("apm-test"))]),
    )?;

    registry.declare(
        "app-container",
        ResourceKind::ContainerDefinition,
        attrs([
            (
                "task-definition",
                AttrValue::Ref(task_definition.attr("family")),
            ),
            (
                "image",
                AttrValue::Map(IndexMap::from([
                    (
                        "repository".to_string(),
                        AttrValue::Ref(repository.attr("repository-name")),
                    ),
                    ("tag".to_string(), AttrValue::from("latest")),
                ])),
            ),
            (
                "port-mappings",
                AttrValue::List(vec![AttrValue::Map(IndexMap::from([
                    ("container-port".to_string(), AttrValue::from(80)),
                    ("host-port".to_string(), AttrValue::from(80)),
                    ("protocol".to_string(), AttrValue::from("tcp")),
                ]))]),
            ),
            (
                "logging",
                AttrValue::Map(IndexMap::from([
                    ("driver".to_string(), AttrValue::from("awslogs")),
                    ("stream-prefix".to_string(), AttrValue::from("ApmSample")),
                    (
                        "log-group".to_string(),
                        AttrValue::Ref(log_group.attr("log-group-name")),
                    ),
                ])),
            ),
        ]),
    )?;

    let cluster = registry.declare(
        "app-cluster",
        ResourceKind::Cluster,
        attrs([
            ("cluster-name", AttrValue::from("app-cluster")),
            ("network", AttrValue::Ref(vpc.attr("cidr"))),
            ("container-insights", AttrValue::from(true)),
        ]),
    )?;

    let service = registry.declare(
        "app-service",
        ResourceKind::Service,
        attrs([
            ("service-name", AttrValue::from("app-service")),
            ("cluster", AttrValue::Ref(cluster.attr("cluster-name"))),
            (
                "task-definition",
                AttrValue::Ref(task_definition.attr("family")),
            ),
            (
                "subnet-group",
                AttrValue::Ref(protected_subnet.attr("group-name")),
            ),
            (
                "security-group",
                AttrValue::Ref(sg_service.attr("group-name")),
            ),
            ("desired-count", AttrValue::from(1)),
            ("max-healthy-percent", AttrValue::from(200)),
            ("min-healthy-percent", AttrValue::from(50)),
            ("enable-execute-command", AttrValue::from(true)),
            ("circuit-breaker", AttrValue::from(true)),
        ]),
    )?;

    let listener = registry.declare(
        "http-listener",
        ResourceKind::Listener,
        attrs([
            ("name", AttrValue::from("http-80")),
            ("port", AttrValue::from(80)),
            ("load-balancer", AttrValue::Ref(alb.attr("name"))),
        ]),
    )?;

    registry.declare(
        "app-target-group",
        ResourceKind::TargetGroup,
        attrs([
            ("listener", AttrValue::Ref(listener.attr("name"))),
            ("port", AttrValue::from(80)),
            (
                "targets",
                AttrValue::List(vec![AttrValue::Ref(service.attr("service-name"))]),
            ),
            (
                "health-check",
                AttrValue::Map(IndexMap::from([
                    ("enabled".to_string(), AttrValue::from(true)),
                    ("path".to_string(), AttrValue::from("/health-check")),
                    ("healthy-http-codes".to_string(), AttrValue::from("200")),
                ])),
            ),
        ]),
    )?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackforge_core::{LogicalName, ResolvedValue};
    use stackforge_plan::Compiler;

    fn position(plan: &stackforge_plan::Plan, name: &str) -> usize {
        plan.position(&LogicalName::from(name))
            .unwrap_or_else(|| panic!("{name} missing from plan"))
    }

    #[test]
    fn test_stack_builds_without_warnings() {
        let registry = declare().unwrap();
        let output = Compiler::new().build(&registry).unwrap();
        assert_eq!(output.plan.len(), 17);
        assert!(output.warnings.is_empty(), "{:?}", output.warnings);
    }

    #[test]
    fn test_network_layer_precedes_compute_layer() {
        let registry = declare().unwrap();
        let plan = Compiler::new().build(&registry).unwrap().plan;

        assert!(position(&plan, "app-vpc") < position(&plan, "public-subnet"));
        assert!(position(&plan, "app-vpc") < position(&plan, "app-cluster"));
        assert!(position(&plan, "sg-alb") < position(&plan, "sg-service"));
        assert!(position(&plan, "sg-service") < position(&plan, "app-service"));
        assert!(position(&plan, "protected-subnet") < position(&plan, "app-service"));
    }

    #[test]
    fn test_container_dependencies_precede_it() {
        let registry = declare().unwrap();
        let plan = Compiler::new().build(&registry).unwrap().plan;

        assert!(position(&plan, "service-logs") < position(&plan, "app-container"));
        assert!(position(&plan, "apm-test") < position(&plan, "app-container"));
        assert!(position(&plan, "service-task") < position(&plan, "app-container"));
        assert!(position(&plan, "task-execution-role") < position(&plan, "service-task"));
    }

    #[test]
    fn test_routing_layer_comes_after_service() {
        let registry = declare().unwrap();
        let plan = Compiler::new().build(&registry).unwrap().plan;

        assert!(position(&plan, "app-alb") < position(&plan, "http-listener"));
        assert!(position(&plan, "http-listener") < position(&plan, "app-target-group"));
        assert!(position(&plan, "app-service") < position(&plan, "app-target-group"));
    }

    #[test]
    fn test_service_ingress_source_resolves_to_alb_group() {
        let registry = declare().unwrap();
        let plan = Compiler::new().build(&registry).unwrap().plan;

        let sg = plan.get(&LogicalName::from("sg-service")).unwrap();
        let ingress = sg.attributes.get("ingress").unwrap();
        match ingress {
            ResolvedValue::List(rules) => match &rules[0] {
                ResolvedValue::Map(rule) => {
                    assert_eq!(rule.get("source"), Some(&ResolvedValue::from("sg-alb")));
                }
                other => panic!("expected map rule, got {other:?}"),
            },
            other => panic!("expected ingress list, got {other:?}"),
        }
    }

    #[test]
    fn test_nat_ingress_source_resolves_to_vpc_cidr() {
        let registry = declare().unwrap();
        let plan = Compiler::new().build(&registry).unwrap().plan;

        let nat = plan.get(&LogicalName::from("nat-ingress")).unwrap();
        assert_eq!(
            nat.attributes.get("source").unwrap().as_str(),
            Some("10.100.0.0/16")
        );
        assert_eq!(nat.depends_on, vec![LogicalName::from("app-vpc")]);
    }

    #[test]
    fn test_health_check_is_preserved_verbatim() {
        let registry = declare().unwrap();
        let plan = Compiler::new().build(&registry).unwrap().plan;

        let tg = plan.get(&LogicalName::from("app-target-group")).unwrap();
        match tg.attributes.get("health-check").unwrap() {
            ResolvedValue::Map(check) => {
                assert_eq!(check.get("path"), Some(&ResolvedValue::from("/health-check")));
                assert_eq!(
                    check.get("healthy-http-codes"),
                    Some(&ResolvedValue::from("200"))
                );
            }
            other => panic!("expected map, got {other:?}"),
        }
    }
}
