use {
    crate::{ImageMsg, RosError},
    futures_util::{Stream, StreamExt},
    ros2_client::{
        Context, MessageTypeName, Name, Node, NodeName, NodeOptions, Subscription,
        ros2::{Duration, QosPolicies, QosPolicyBuilder, policy},
    },
    std::future::Future,
};

/// Split a fully qualified topic into `(namespace, base name)`.
///
/// `/zed/zed_node/rgb/image_rect_color` becomes
/// `("/zed/zed_node/rgb", "image_rect_color")`; a topic without a namespace
/// lands in `/`.
pub fn split_topic(topic: &str) -> Result<(String, String), RosError> {
    let topic = topic.trim_end_matches('/');
    let (namespace, base) = match topic.rsplit_once('/') {
        Some((namespace, base)) => (namespace, base),
        None => ("", topic),
    };
    if base.is_empty() {
        return Err(RosError::Name(format!("topic '{topic}' has no base name")));
    }
    let namespace = if namespace.is_empty() {
        "/".to_string()
    } else if namespace.starts_with('/') {
        namespace.to_string()
    } else {
        format!("/{namespace}")
    };
    Ok((namespace, base.to_string()))
}

/// Reliable keep-last history of `depth` samples, what rclpy gives for a
/// plain integer QoS.
pub fn keep_last(depth: i32) -> QosPolicies {
    QosPolicyBuilder::new()
        .durability(policy::Durability::Volatile)
        .reliability(policy::Reliability::Reliable {
            max_blocking_time: Duration::from_millis(100),
        })
        .history(policy::History::KeepLast { depth })
        .build()
}

/// A ROS 2 node with one `sensor_msgs/Image` subscription.
pub struct ImageSubscriber {
    // field order is drop order: subscription before its node
    subscription: Subscription<ImageMsg>,
    node: Node,
    topic: String,
}

impl ImageSubscriber {
    pub fn new(
        context: &Context,
        node_name: &str,
        topic: &str,
        depth: i32,
    ) -> Result<Self, RosError> {
        let node_name =
            NodeName::new("/", node_name).map_err(|e| RosError::Name(format!("{e:?}")))?;
        let mut node = context
            .new_node(node_name, NodeOptions::new().enable_rosout(true))
            .map_err(|e| RosError::Create(format!("failed to create node: {e:?}")))?;

        let (namespace, base) = split_topic(topic)?;
        let name = Name::new(&namespace, &base).map_err(|e| RosError::Name(format!("{e:?}")))?;
        let qos = keep_last(depth);
        let ros_topic = node
            .create_topic(
                &name,
                MessageTypeName::new(ImageMsg::PACKAGE, ImageMsg::TYPE),
                &qos,
            )
            .map_err(|e| RosError::Create(format!("failed to create topic {topic}: {e:?}")))?;
        let subscription = node
            .create_subscription::<ImageMsg>(&ros_topic, Some(qos))
            .map_err(|e| RosError::Create(format!("failed to subscribe to {topic}: {e:?}")))?;

        log::debug!("subscribed to {topic}");

        Ok(Self {
            subscription,
            node,
            topic: topic.to_string(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Background task servicing the node (graph events, rosout). Must be
    /// polled alongside [`frames`](Self::frames).
    pub fn spin(
        &mut self,
    ) -> Result<impl Future<Output = Result<(), RosError>> + use<>, RosError> {
        let spinner = self
            .node
            .spinner()
            .map_err(|e| RosError::Create(format!("failed to create spinner: {e:?}")))?;
        Ok(async move {
            spinner
                .spin()
                .await
                .map_err(|e| RosError::Spin(format!("{e:?}")))
        })
    }

    /// Incoming frames in arrival order.
    pub fn frames(&self) -> impl Stream<Item = Result<ImageMsg, RosError>> + '_ {
        self.subscription.async_stream().map(|result| {
            result
                .map(|(msg, _info)| msg)
                .map_err(|e| RosError::Read(format!("{e:?}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_camera_topic() {
        let (namespace, base) = split_topic("/zed/zed_node/rgb/image_rect_color").unwrap();
        assert_eq!(namespace, "/zed/zed_node/rgb");
        assert_eq!(base, "image_rect_color");
    }

    #[test]
    fn test_split_root_and_relative() {
        assert_eq!(
            split_topic("/image").unwrap(),
            ("/".to_string(), "image".to_string())
        );
        assert_eq!(
            split_topic("image").unwrap(),
            ("/".to_string(), "image".to_string())
        );
        assert_eq!(
            split_topic("camera/image/").unwrap(),
            ("/camera".to_string(), "image".to_string())
        );
    }

    #[test]
    fn test_split_rejects_empty() {
        assert!(split_topic("").is_err());
        assert!(split_topic("/").is_err());
    }
}
